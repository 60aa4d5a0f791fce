//! Logout command implementation.

use anyhow::{Context, Result};

use izin_client::SessionClient;

use crate::output;

pub async fn run(client: &SessionClient) -> Result<()> {
    client.logout().await.context("Failed to logout")?;
    output::success("Logged out");
    Ok(())
}
