//! Wire DTOs for the licensing service endpoints.
//!
//! Bodies use snake_case field names as the service does. Domain conversions
//! live here so `backend.rs` stays a thin trait implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use izin_core::{
    AccessToken, Credential, LoginOutput, RefreshToken, RegisterOutput, Role, UserRecord,
};

/// Error body shape returned by the service on non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserRecord,
}

impl From<LoginResponse> for LoginOutput {
    fn from(response: LoginResponse) -> Self {
        LoginOutput {
            credential: Credential {
                access_token: AccessToken::new(response.access_token),
                refresh_token: RefreshToken::new(response.refresh_token),
                expires_at: response.expires_at,
            },
            user: response.user,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterResponse {
    pub message: String,
    pub user_id: String,
    pub email_verification_required: bool,
}

impl From<RegisterResponse> for RegisterOutput {
    fn from(response: RegisterResponse) -> Self {
        RegisterOutput {
            message: response.message,
            user_id: response.user_id,
            email_verification_required: response.email_verification_required,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RefreshBody<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<RefreshResponse> for Credential {
    fn from(response: RefreshResponse) -> Self {
        Credential {
            access_token: AccessToken::new(response.access_token),
            refresh_token: RefreshToken::new(response.refresh_token),
            expires_at: response.expires_at,
        }
    }
}
