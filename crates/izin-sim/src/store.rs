//! In-memory fixture state behind the simulated backend.

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use izin_core::{
    Error, License, LicenseApplication, LicenseKind, LicenseStatus, Result, Role, UserRecord,
};

/// A fixture account: the user record plus its expected password.
#[derive(Debug, Clone)]
pub(crate) struct SimUser {
    pub record: UserRecord,
    pub password: String,
}

#[derive(Debug)]
struct State {
    users: Vec<SimUser>,
    licenses: Vec<License>,
    next_user: u32,
}

/// Mutex-guarded fixture state shared by all clones of the backend.
#[derive(Debug, Clone)]
pub(crate) struct SimStore {
    inner: Arc<Mutex<State>>,
}

impl SimStore {
    /// Create a store populated with the standard fixture set.
    pub fn seeded() -> Self {
        let users = vec![
            SimUser {
                record: UserRecord {
                    id: "usr-0001".into(),
                    email: "admin@saasumkm.com".into(),
                    full_name: "Administrator SaaS UMKM".into(),
                    role: Role::Admin,
                },
                password: "password".into(),
            },
            SimUser {
                record: UserRecord {
                    id: "usr-0002".into(),
                    email: "tuti@warungmaju.id".into(),
                    full_name: "Tuti Handayani".into(),
                    role: Role::Owner,
                },
                password: "rahasia123".into(),
            },
            SimUser {
                record: UserRecord {
                    id: "usr-0003".into(),
                    email: "budi@saasumkm.com".into(),
                    full_name: "Budi Santoso".into(),
                    role: Role::Staff,
                },
                password: "password".into(),
            },
        ];

        // Fixed timestamp keeps the fixture deterministic across runs.
        let submitted_at = Utc.with_ymd_and_hms(2025, 11, 3, 9, 30, 0).unwrap();
        let licenses = vec![License {
            id: "lic-0001".into(),
            owner_id: "usr-0002".into(),
            kind: LicenseKind::TradePermit,
            business_name: "Warung Maju".into(),
            status: LicenseStatus::Approved,
            submitted_at,
            notes: None,
        }];

        Self {
            inner: Arc::new(Mutex::new(State {
                users,
                licenses,
                next_user: 4,
            })),
        }
    }

    /// Case-sensitive email lookup.
    pub fn find_by_email(&self, email: &str) -> Option<SimUser> {
        let state = self.inner.lock().expect("sim store poisoned");
        state.users.iter().find(|u| u.record.email == email).cloned()
    }

    pub fn find_by_id(&self, id: &str) -> Option<SimUser> {
        let state = self.inner.lock().expect("sim store poisoned");
        state.users.iter().find(|u| u.record.id == id).cloned()
    }

    /// Append a new user, enforcing email uniqueness (case-sensitive).
    pub fn insert_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<String> {
        let mut state = self.inner.lock().expect("sim store poisoned");

        if state.users.iter().any(|u| u.record.email == email) {
            return Err(Error::Conflict("email already exists".into()));
        }

        let id = format!("usr-{:04}", state.next_user);
        state.next_user += 1;
        state.users.push(SimUser {
            record: UserRecord {
                id: id.clone(),
                email: email.into(),
                full_name: full_name.into(),
                role,
            },
            password: password.into(),
        });

        Ok(id)
    }

    pub fn licenses_for(&self, owner_id: &str) -> Vec<License> {
        let state = self.inner.lock().expect("sim store poisoned");
        state
            .licenses
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect()
    }

    /// Fetch a license by id. A license owned by someone else reads as
    /// missing rather than forbidden.
    pub fn get_license(&self, owner_id: &str, id: &str) -> Result<License> {
        let state = self.inner.lock().expect("sim store poisoned");
        state
            .licenses
            .iter()
            .find(|l| l.id == id && l.owner_id == owner_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("license '{id}' not found")))
    }

    pub fn insert_license(&self, owner_id: &str, application: &LicenseApplication) -> License {
        let mut state = self.inner.lock().expect("sim store poisoned");
        let license = License {
            id: format!("lic-{}", uuid::Uuid::new_v4()),
            owner_id: owner_id.into(),
            kind: application.kind,
            business_name: application.business_name.clone(),
            status: LicenseStatus::Submitted,
            submitted_at: Utc::now(),
            notes: application.notes.clone(),
        };
        state.licenses.push(license.clone());
        license
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_lookup_is_case_sensitive() {
        let store = SimStore::seeded();
        assert!(store.find_by_email("admin@saasumkm.com").is_some());
        assert!(store.find_by_email("Admin@saasumkm.com").is_none());
    }

    #[test]
    fn duplicate_email_conflicts() {
        let store = SimStore::seeded();
        let id = store
            .insert_user("baru@toko.id", "pw", "Pemilik Baru", Role::Owner)
            .unwrap();
        assert_eq!(id, "usr-0004");

        let err = store
            .insert_user("baru@toko.id", "pw", "Pemilik Baru", Role::Owner)
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn license_of_another_owner_reads_as_missing() {
        let store = SimStore::seeded();
        assert!(store.get_license("usr-0002", "lic-0001").is_ok());
        assert!(matches!(
            store.get_license("usr-0001", "lic-0001"),
            Err(Error::NotFound(_))
        ));
    }
}
