//! Local access-token expiry inspection.
//!
//! Access tokens are self-contained JWT-shaped strings; their claims segment
//! can be decoded without any network call or signature verification. This
//! module answers one question: is the token worth attaching to a request
//! right now? It is evaluated speculatively before every authenticated call,
//! so malformed input is a `false` result, never an error.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The claims this module cares about. Unknown claims are ignored.
#[derive(Debug, Deserialize)]
struct Claims {
    exp: i64,
}

/// Check whether an access token is currently usable.
///
/// Returns `false` if the token is empty, structurally malformed, carries no
/// readable `exp` claim, or its expiry is not in the future. Never panics and
/// never performs I/O.
pub fn is_usable(token: &str) -> bool {
    is_usable_at(token, Utc::now())
}

/// [`is_usable`] against an explicit clock, for tests.
pub fn is_usable_at(token: &str, now: DateTime<Utc>) -> bool {
    match expiry_of(token) {
        Some(exp) => exp > now.timestamp(),
        None => false,
    }
}

/// Extract the `exp` claim, tolerating nothing: any structural problem is
/// `None`.
fn expiry_of(token: &str) -> Option<i64> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    let _signature = segments.next()?;
    if segments.next().is_some() || payload.is_empty() {
        return None;
    }

    let decoded = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: Claims = serde_json::from_slice(&decoded).ok()?;
    Some(claims.exp)
}
