//! Stop command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Stop the proxy.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    println!("Stopping the proxy...");
    let response = ctx.control().stop_proxy().await.map_err(CliError::from)?;
    println!("{}", response.message);
    Ok(())
}
