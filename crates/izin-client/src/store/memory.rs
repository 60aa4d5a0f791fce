//! In-process token store.

use std::sync::Mutex;

use izin_core::{Credential, Result, TokenStore, UserRecord};

/// Token store backed by process memory.
///
/// Credential and user record live in one mutex-guarded slot, so `set`
/// replaces both in a single step and readers never observe a mismatched
/// pair. State does not survive the process; use
/// [`FileTokenStore`](crate::FileTokenStore) for durability.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<(Credential, UserRecord)>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<Credential> {
        let slot = self.slot.lock().expect("token store poisoned");
        slot.as_ref().map(|(credential, _)| credential.clone())
    }

    fn user(&self) -> Option<UserRecord> {
        let slot = self.slot.lock().expect("token store poisoned");
        slot.as_ref().map(|(_, user)| user.clone())
    }

    fn set(&self, credential: Credential, user: UserRecord) -> Result<()> {
        let mut slot = self.slot.lock().expect("token store poisoned");
        *slot = Some((credential, user));
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self.slot.lock().expect("token store poisoned");
        *slot = None;
        Ok(())
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
                id: "usr-0001".into(),
                email: "admin@saasumkm.com".into(),
                full_name: "Administrator SaaS UMKM".into(),
                role: Role::Admin,
            },
        )
    }

    #[test]
    fn set_get_clear_round_trip() {
        let store = MemoryTokenStore::new();
        assert!(store.get().is_none());
        assert!(store.user().is_none());

        let (credential, user) = sample();
        store.set(credential, user.clone()).unwrap();

        let got = store.get().unwrap();
        assert_eq!(got.access_token.as_str(), "a1");
        assert_eq!(got.refresh_token.as_str(), "r1");
        assert_eq!(store.user().unwrap(), user);

        store.clear().unwrap();
        assert!(store.get().is_none());
        assert!(store.user().is_none());
    }
}
