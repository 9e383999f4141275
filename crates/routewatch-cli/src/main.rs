//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses arguments, installs logging, builds the CLI context
//! and dispatches to the command handlers.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use routewatch_cli::{Cli, CliError, Commands, bootstrap, handlers, logging, settings_from_cli};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = settings_from_cli(&cli);

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(&settings)?;

    match command {
        Commands::Watch { view } => handlers::watch::execute(&ctx, &view).await?,
        Commands::Start { watch, view } => {
            handlers::start::execute(&ctx, watch.then_some(&view)).await?;
        }
        Commands::Stop => handlers::stop::execute(&ctx).await?,
        Commands::Configure(args) => handlers::configure::execute(&ctx, &args).await?,
        Commands::Status => handlers::status::execute(&ctx).await?,
    }

    Ok(())
}
