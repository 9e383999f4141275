//! Start command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::commands::ViewArgs;
use crate::error::CliError;
use crate::handlers::watch;

/// Start the proxy, then optionally watch its route log.
///
/// # Errors
///
/// Fails with the server's message when the proxy is already running or not
/// configured.
pub async fn execute(ctx: &CliContext, watch_args: Option<&ViewArgs>) -> Result<()> {
    println!("Starting the proxy...");
    let response = ctx.control().start_proxy().await.map_err(CliError::from)?;
    println!("{}", response.message);

    if let Some(args) = watch_args {
        watch::execute(ctx, args).await?;
    }
    Ok(())
}
