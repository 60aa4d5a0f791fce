//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::licenses::LicenseCommand;
use crate::commands::login::LoginArgs;
use crate::commands::register::RegisterArgs;

/// CLI for the SaaS UMKM business-licensing platform.
#[derive(Parser, Debug)]
#[command(name = "izin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Route all calls to the deterministic simulated backend
    #[arg(long, global = true)]
    pub simulate: bool,

    /// Base URL of the licensing service
    #[arg(long, global = true, default_value = "https://api.saasumkm.com")]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate and store the session
    Login(LoginArgs),
    /// End the session and clear stored credentials
    Logout,
    /// Register a new account
    Register(RegisterArgs),
    /// Show the authenticated user
    Whoami,
    /// License operations
    #[command(subcommand)]
    License(LicenseCommand),
}
