//! Subcommand definitions.

use clap::{Args, Subcommand, ValueEnum};
use routewatch_core::{ProxyType, RowSelection, SaveProxyRequest};

use crate::presentation::ViewMode;

/// How to show observed routes.
#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Only show routes containing this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub filter: String,

    /// Redraw a table of the latest endpoint per route instead of logging
    /// every observation
    #[arg(long)]
    pub table: bool,

    /// Mark a route in the table (repeatable)
    #[arg(long = "select", value_name = "ROUTE")]
    pub select: Vec<String>,
}

impl ViewArgs {
    pub const fn mode(&self) -> ViewMode {
        if self.table {
            ViewMode::Table
        } else {
            ViewMode::Log
        }
    }

    /// Selection seeded from `--select`.
    pub fn selection(&self) -> RowSelection {
        let mut selection = RowSelection::new();
        for route in &self.select {
            if !selection.is_selected(route) {
                selection.toggle(route);
            }
        }
        selection
    }
}

/// Where the proxy sends intercepted traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProxyMode {
    /// Browser talks to the proxy directly
    Browser,
    /// Forward to an upstream Burp Suite listener
    Burpsuite,
}

impl From<ProxyMode> for ProxyType {
    fn from(mode: ProxyMode) -> Self {
        match mode {
            ProxyMode::Browser => Self::ZerodayfToBrowser,
            ProxyMode::Burpsuite => Self::ZerodayfToBurpsuite,
        }
    }
}

/// Proxy settings to save.
#[derive(Debug, Clone, Args)]
pub struct ConfigureArgs {
    /// Address the proxy listens on
    #[arg(long)]
    pub ip: String,

    /// Port the proxy listens on (1-65535)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Where intercepted traffic goes
    #[arg(long, value_enum, default_value_t = ProxyMode::Browser)]
    pub mode: ProxyMode,

    /// Upstream Burp Suite listener URL
    #[arg(long, default_value = "")]
    pub burpsuite: String,

    /// Path of the application source being tested
    #[arg(long, default_value = "")]
    pub source_path: String,

    /// Web framework of the application
    #[arg(long, default_value = "")]
    pub framework: String,
}

impl ConfigureArgs {
    pub fn to_request(&self) -> SaveProxyRequest {
        SaveProxyRequest::new(&self.ip, self.port, self.mode.into())
            .with_burpsuite(&self.burpsuite)
            .with_source_path(&self.source_path)
            .with_framework(&self.framework)
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Stream route observations until interrupted (Ctrl+C)
    Watch {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Start the intercepting proxy
    Start {
        /// Watch the route log after the proxy starts
        #[arg(short, long)]
        watch: bool,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Stop the intercepting proxy
    Stop,
    /// Save the proxy listen settings
    Configure(ConfigureArgs),
    /// Show whether the proxy is running and how it is configured
    Status,
}
