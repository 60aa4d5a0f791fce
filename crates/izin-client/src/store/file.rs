//! File-backed token store.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

use izin_core::{Credential, Error, Result, TokenStore, UserRecord};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// On-disk session document. Tokens and the cached user record live under
/// stable fields of one file so they are written and cleared together.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    credential: Credential,
    user: UserRecord,
}

/// Token store backed by a JSON file, so a restart does not force
/// re-authentication.
///
/// Writes happen under a mutex and replace the whole document, keeping the
/// token pair consistent for readers. An unreadable or corrupt file reads as
/// an empty store; write failures surface as
/// [`Error::Storage`](izin_core::Error::Storage).
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Create a store at the given file path. Parent directories must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read(&self) -> Option<StoredSession> {
        let _lock = self.lock.lock().expect("token store poisoned");

        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(error = %err, path = %self.path.display(), "Failed to read session file");
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(stored) => Some(stored),
            Err(err) => {
                warn!(error = %err, path = %self.path.display(), "Invalid session file");
                None
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<Credential> {
        self.read().map(|stored| stored.credential)
    }

    fn user(&self) -> Option<UserRecord> {
        self.read().map(|stored| stored.user)
    }

    fn set(&self, credential: Credential, user: UserRecord) -> Result<()> {
        let _lock = self.lock.lock().expect("token store poisoned");

        let stored = StoredSession { credential, user };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|err| Error::Storage(err.to_string()))?;

        fs::write(&self.path, &json).map_err(|err| {
            Error::Storage(format!("failed to write {}: {err}", self.path.display()))
        })?;

        // Tokens grant account access; keep the file private (Unix only).
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.path, perms).map_err(|err| {
                Error::Storage(format!(
                    "failed to set permissions on {}: {err}",
                    self.path.display()
                ))
            })?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _lock = self.lock.lock().expect("token store poisoned");

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::Storage(format!(
                "failed to remove {}: {err}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use izin_core::{AccessToken, RefreshToken, Role};

    fn sample() -> (Credential, UserRecord) {
        (
            Credential {
                access_token: AccessToken::new("a1"),
                refresh_token: RefreshToken::new("r1"),
                expires_at: Utc::now(),
            },
            UserRecord {
                id: "usr-0002".into(),
                email: "tuti@warungmaju.id".into(),
                full_name: "Tuti Handayani".into(),
                role: Role::Owner,
            },
        )
    }

    #[test]
    fn survives_a_store_reconstruction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let (credential, user) = sample();
        let store = FileTokenStore::new(&path);
        store.set(credential, user.clone()).unwrap();
        drop(store);

        // A fresh instance over the same path sees the session.
        let store = FileTokenStore::new(&path);
        assert_eq!(store.get().unwrap().access_token.as_str(), "a1");
        assert_eq!(store.user().unwrap(), user);
    }

    #[test]
    fn clear_removes_the_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let (credential, user) = sample();
        let store = FileTokenStore::new(&path);
        store.set(credential, user).unwrap();
        store.clear().unwrap();

        assert!(store.get().is_none());
        assert!(!path.exists());
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(store.get().is_none());
        assert!(store.user().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let (credential, user) = sample();
        let store = FileTokenStore::new(&path);
        store.set(credential, user).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
