//! Register command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use izin_client::SessionClient;
use izin_core::{RegisterRequest, Role};

use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Full name of the account holder
    #[arg(long)]
    pub full_name: String,

    /// Account role (admin, staff, owner); defaults to owner
    #[arg(long)]
    pub role: Option<String>,
}

pub async fn run(client: &SessionClient, args: RegisterArgs) -> Result<()> {
    let role = match args.role.as_deref() {
        None => None,
        Some("admin") => Some(Role::Admin),
        Some("staff") => Some(Role::Staff),
        Some("owner") => Some(Role::Owner),
        Some(other) => bail!("Unknown role '{other}' (expected admin, staff or owner)"),
    };

    let request = RegisterRequest {
        email: args.email,
        password: args.password,
        full_name: args.full_name,
        role,
    };

    let result = client
        .register(&request)
        .await
        .context("Failed to register")?;

    output::success(&result.message);
    output::field("User id", &result.user_id);
    if result.email_verification_required {
        output::field("Next step", "check your inbox to verify the email address");
    }

    Ok(())
}
