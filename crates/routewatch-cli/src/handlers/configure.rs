//! Configure command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::commands::ConfigureArgs;
use crate::error::CliError;

/// Save the proxy settings, then show what the server now reports.
///
/// # Errors
///
/// Fails on an invalid port or IP, or with the server's `detail` when it
/// refuses the save.
pub async fn execute(ctx: &CliContext, args: &ConfigureArgs) -> Result<()> {
    let control = ctx.control();
    let response = control
        .save_proxy_settings(&args.to_request())
        .await
        .map_err(CliError::from)?;
    println!("{}", response.message);

    let settings = control.proxy_settings().await.map_err(CliError::from)?;
    println!("Settings: {settings}");
    Ok(())
}
