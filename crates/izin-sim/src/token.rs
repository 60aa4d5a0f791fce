//! Simulated token minting and validation.
//!
//! Access tokens are unsigned JWT-shaped strings so that local expiry
//! inspection works on them exactly as it does on real tokens. Refresh
//! tokens use the format `sim-refresh.<user_id>.<uuid>`; refresh validation
//! is purely structural, matching the simulated contract.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use izin_core::{AccessToken, Credential, Error, RefreshToken, Result};

/// Lifetime of a simulated access token.
const ACCESS_TTL_MINUTES: i64 = 15;

const REFRESH_PREFIX: &str = "sim-refresh.";

/// Mint a fresh credential for the given user.
pub(crate) fn mint_credential(user_id: &str, now: DateTime<Utc>) -> Credential {
    let expires_at = now + Duration::minutes(ACCESS_TTL_MINUTES);

    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({
            "sub": user_id,
            "iat": now.timestamp(),
            "exp": expires_at.timestamp(),
        })
        .to_string(),
    );

    Credential {
        access_token: AccessToken::new(format!("{header}.{payload}.sim")),
        refresh_token: RefreshToken::new(format!("{REFRESH_PREFIX}{user_id}.{}", Uuid::new_v4())),
        expires_at,
    }
}

/// Extract the subject of an access token, rejecting absent, malformed, or
/// expired tokens the way the real service would: with `Unauthorized`.
pub(crate) fn subject_of(token: Option<&AccessToken>, now: DateTime<Utc>) -> Result<String> {
    let token = token.ok_or_else(|| Error::Unauthorized("missing access token".into()))?;

    let (sub, exp) = decode_claims(token.as_str())
        .ok_or_else(|| Error::Unauthorized("invalid access token".into()))?;

    if exp <= now.timestamp() {
        return Err(Error::Unauthorized("access token expired".into()));
    }

    Ok(sub)
}

/// Extract the subject of a refresh token, checking only the simulated
/// format.
pub(crate) fn refresh_subject(token: &RefreshToken) -> Result<String> {
    let rest = token
        .as_str()
        .strip_prefix(REFRESH_PREFIX)
        .ok_or_else(|| Error::Unauthorized("invalid refresh token".into()))?;

    match rest.rsplit_once('.') {
        Some((user_id, suffix)) if !user_id.is_empty() && !suffix.is_empty() => {
            Ok(user_id.to_string())
        }
        _ => Err(Error::Unauthorized("invalid refresh token".into())),
    }
}

fn decode_claims(token: &str) -> Option<(String, i64)> {
    let payload = token.split('.').nth(1)?;
    let decoded = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let value: serde_json::Value = serde_json::from_slice(&decoded).ok()?;

    let sub = value.get("sub")?.as_str()?.to_string();
    let exp = value.get("exp")?.as_i64()?;
    Some((sub, exp))
}
