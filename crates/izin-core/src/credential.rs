//! Credential and cached user types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tokens::{AccessToken, RefreshToken};

/// The access/refresh token pair plus its expiry marker.
///
/// Both tokens live in one value, so no partial credential state is
/// representable: a `Credential` either exists with both tokens or does not
/// exist at all. Created on successful login or refresh, replaced atomically
/// on refresh, destroyed on logout or terminal authorization failure.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
    pub expires_at: DateTime<Utc>,
}

// Hide token values in Debug output
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// A user's role within the licensing platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Owner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Staff => write!(f, "staff"),
            Role::Owner => write!(f, "owner"),
        }
    }
}

/// Denormalized copy of the authenticated user, cached beside the credential
/// purely for display. The backend's response at login/refresh time is the
/// source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

/// Derived session state: a pure function of token-store contents at query
/// time, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// A credential is present and its access token passes local expiry
    /// inspection.
    Authenticated,
    /// A credential is present but its access token is expired; a refresh
    /// must be attempted before further calls.
    Stale,
    /// No credential is stored.
    Anonymous,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_hides_tokens_in_debug() {
        let credential = Credential {
            access_token: AccessToken::new("secret-access"),
            refresh_token: RefreshToken::new("secret-refresh"),
            expires_at: Utc::now(),
        };
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("secret-access"));
        assert!(!debug.contains("secret-refresh"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"owner\"");
    }
}
