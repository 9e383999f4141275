//! Status command handler.
//!
//! Shows whether the proxy is running and the configured listen details.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let control = ctx.control();
    let (running, settings) = tokio::try_join!(control.is_running(), control.proxy_settings())
        .map_err(CliError::from)?;

    println!("Server:   {}", ctx.config().base_url());
    println!("Proxy:    {}", if running { "running" } else { "stopped" });
    println!("Settings: {settings}");
    Ok(())
}
