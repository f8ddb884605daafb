//! Car Home Services booking client.
//!
//! Binary name: `carcare`
//!
//! Parses CLI arguments, resolves configuration, then dispatches to the
//! customer booking commands or the admin commands.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{AdminCommand, Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,carcare=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Shell completions don't need a backend
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "carcare", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.backend_url.as_deref()).await?;

    match cli.command {
        Commands::Services => {
            cli::catalog::list_services(&state.api, cli.json).await?;
        }

        Commands::Packages { service } => {
            cli::catalog::list_packages(&state.api, &service, cli.json).await?;
        }

        Commands::Addons => {
            cli::catalog::list_addons(cli.json)?;
        }

        Commands::Quote(args) => {
            cli::catalog::quote(state.api.clone(), args, cli.json).await?;
        }

        Commands::Book(args) => {
            cli::book::book(&state, args, cli.json).await?;
        }

        Commands::Admin { action } => match action {
            AdminCommand::List { status } => {
                cli::admin::list_bookings(state.api.clone(), status, cli.json).await?;
            }
            AdminCommand::SetStatus { id, status } => {
                cli::admin::set_status(state.api.clone(), &id, status, cli.json).await?;
            }
        },

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
