//! Session client construction for CLI commands.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use izin_client::{ClientConfig, FileTokenStore, SessionClient};
use izin_core::BaseUrl;

/// Path of the persisted session document.
fn session_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "izin").context("Could not determine config directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Build a session client over the persisted file store.
pub fn session_client(simulate: bool, base_url: &str) -> Result<SessionClient> {
    let config = if simulate {
        ClientConfig::simulated()
    } else {
        let base_url = BaseUrl::new(base_url).context("Invalid base URL")?;
        ClientConfig::remote(base_url)
    };

    let store = Arc::new(FileTokenStore::new(session_path()?));
    SessionClient::from_config(&config, store).context("Failed to construct client")
}
