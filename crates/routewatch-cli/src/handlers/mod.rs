//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that call the client crate and format output for the
//!   terminal.

pub mod configure;
pub mod start;
pub mod status;
pub mod stop;
pub mod watch;
