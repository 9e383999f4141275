//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for watching the proxy route log.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Debug, Parser)]
#[command(name = "routewatch")]
#[command(about = "Watch which routes an intercepting proxy has handled")]
#[command(version)]
pub struct Cli {
    /// Base URL of the server exposing /proxy/*
    #[arg(long = "base-url", env = "ROUTEWATCH_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Delay before reconnecting after the log stream drops
    #[arg(
        long = "reconnect-delay-ms",
        env = "ROUTEWATCH_RECONNECT_DELAY_MS",
        global = true
    )]
    pub reconnect_delay_ms: Option<u64>,

    /// Give up after this many consecutive failed reconnects (default: never)
    #[arg(long = "max-reconnects", env = "ROUTEWATCH_MAX_RECONNECTS", global = true)]
    pub max_reconnects: Option<u32>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "routewatch",
            "--verbose",
            "--base-url",
            "http://10.0.0.5:8000",
            "--reconnect-delay-ms",
            "500",
            "status",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.base_url.as_deref(), Some("http://10.0.0.5:8000"));
        assert_eq!(cli.reconnect_delay_ms, Some(500));
        assert!(matches!(cli.command, Some(Commands::Status)));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["routewatch", "watch", "--max-reconnects", "3"]);
        assert_eq!(cli.max_reconnects, Some(3));
    }

    #[test]
    fn test_invalid_delay_rejected() {
        assert!(Cli::try_parse_from(["routewatch", "--reconnect-delay-ms", "soon", "watch"]).is_err());
    }
}
