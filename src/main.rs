mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    init_tracing(if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    });
    cli::context::init(args.data_dir.as_deref());

    let result = match &args.command {
        Commands::Keys { action } => cli::commands::keys::execute(action),
        Commands::Dashboard { json, active_only } => {
            cli::commands::dashboard::execute(*json, *active_only)
        }
        Commands::Account { id, json } => cli::commands::account::execute(id, *json),
        Commands::Traffic { id, from, to } => cli::commands::traffic::execute(id, from, to),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber; `RUST_LOG` overrides the default level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
