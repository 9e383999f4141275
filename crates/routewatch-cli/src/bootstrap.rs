//! CLI bootstrap - the composition root.
//!
//! Turns command-line and environment values into validated settings, then
//! builds the client configuration and the control client that handlers use.

use routewatch_client::{ControlClient, StreamClientConfig};
use routewatch_core::{SettingsUpdate, WatchSettings, validate_settings};

use crate::error::CliError;
use crate::parser::Cli;

/// Everything a command handler needs.
#[derive(Debug, Clone)]
pub struct CliContext {
    config: StreamClientConfig,
    control: ControlClient,
}

impl CliContext {
    /// Configuration for new stream sessions.
    pub const fn config(&self) -> &StreamClientConfig {
        &self.config
    }

    /// Client for the proxy control endpoints.
    pub const fn control(&self) -> &ControlClient {
        &self.control
    }
}

/// Layer command-line (and env) values over the defaults.
pub fn settings_from_cli(cli: &Cli) -> WatchSettings {
    let mut settings = WatchSettings::with_defaults();
    settings.merge(&SettingsUpdate {
        base_url: cli.base_url.clone().map(Some),
        reconnect_delay_ms: cli.reconnect_delay_ms.map(Some),
        max_reconnect_attempts: cli.max_reconnects.map(Some),
    });
    settings
}

/// Validate settings and build the CLI context.
pub fn bootstrap(settings: &WatchSettings) -> Result<CliContext, CliError> {
    validate_settings(settings)?;

    let config = StreamClientConfig::from_settings(settings);
    let control = ControlClient::new(&config)?;

    tracing::debug!(base_url = config.base_url(), "CLI context ready");
    Ok(CliContext { config, control })
}
