//! izin - CLI for the SaaS UMKM business-licensing platform.
//!
//! This is a thin wrapper over the `izin-client` library, intended for
//! manual exploration and scripting against either the simulated or the
//! real backend.

mod cli;
mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let client = context::session_client(cli.simulate, &cli.base_url)?;

    match cli.command {
        Commands::Login(args) => commands::login::run(&client, args).await,
        Commands::Logout => commands::logout::run(&client).await,
        Commands::Register(args) => commands::register::run(&client, args).await,
        Commands::Whoami => commands::whoami::run(&client).await,
        Commands::License(cmd) => commands::licenses::run(&client, cmd).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
