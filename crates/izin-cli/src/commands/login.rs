//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use izin_client::SessionClient;

use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(client: &SessionClient, args: LoginArgs) -> Result<()> {
    eprintln!("{}", "Logging in...".dimmed());

    let user = client
        .login(&args.email, &args.password)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("User", &user.full_name);
    output::field("Email", &user.email);
    output::field("Role", &user.role.to_string());

    Ok(())
}
