//! Backend trait.
//!
//! Both backend implementations (simulated and HTTP) expose this exact
//! operation set with the exact same success and error shapes, so the
//! session layer and its callers are oblivious to which one is active.

use async_trait::async_trait;
use std::fmt;

use crate::Result;
use crate::credential::{Credential, Role, UserRecord};
use crate::license::{License, LicenseApplication};
use crate::tokens::{AccessToken, RefreshToken};

/// Output from a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutput {
    /// The freshly issued token pair.
    pub credential: Credential,
    /// The authenticated user, as reported by the backend.
    pub user: UserRecord,
}

/// Payload for account registration.
#[derive(Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// Defaults to [`Role::Owner`] when omitted.
    pub role: Option<Role>,
}

// Hide the password in Debug output
impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .finish()
    }
}

/// Output from a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterOutput {
    pub message: String,
    pub user_id: String,
    pub email_verification_required: bool,
}

/// A backend implementation of the licensing service operations.
///
/// Authenticated operations take the access token per call; `None` means the
/// call is issued unauthenticated, in which case the backend is expected to
/// reject it with [`Error::Unauthorized`](crate::Error::Unauthorized).
#[async_trait]
pub trait Backend: Send + Sync {
    /// Authenticate and obtain a fresh credential plus user record.
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutput>;

    /// Register a new account.
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutput>;

    /// Exchange a refresh token for a fresh credential.
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<Credential>;

    /// Invalidate the session server-side. Best-effort; local credential
    /// clearing happens regardless of this call's outcome.
    async fn logout(&self, token: Option<&AccessToken>) -> Result<()>;

    /// Fetch the authenticated user's record.
    async fn me(&self, token: Option<&AccessToken>) -> Result<UserRecord>;

    /// List the caller's license records.
    async fn list_licenses(&self, token: Option<&AccessToken>) -> Result<Vec<License>>;

    /// Fetch a single license record by id.
    async fn get_license(&self, token: Option<&AccessToken>, id: &str) -> Result<License>;

    /// Submit a new license application.
    async fn create_license(
        &self,
        token: Option<&AccessToken>,
        application: &LicenseApplication,
    ) -> Result<License>;
}
