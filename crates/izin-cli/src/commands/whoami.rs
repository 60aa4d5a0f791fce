//! Whoami command implementation.

use anyhow::{Context, Result};

use izin_client::SessionClient;
use izin_core::SessionState;

use crate::output;

pub async fn run(client: &SessionClient) -> Result<()> {
    if client.session_state() == SessionState::Anonymous {
        anyhow::bail!("No active session. Run 'izin login' first.");
    }

    let user = client.me().await.context("Failed to fetch user")?;

    output::field("User", &user.full_name);
    output::field("Email", &user.email);
    output::field("Role", &user.role.to_string());
    output::field("Id", &user.id);

    Ok(())
}
