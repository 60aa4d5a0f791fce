//! Simulated backend implementation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument};

use izin_core::{
    AccessToken, Backend, Credential, Error, License, LicenseApplication, LoginOutput,
    RefreshToken, RegisterOutput, RegisterRequest, Result, Role, UserRecord,
};

use crate::store::SimStore;
use crate::token;

/// Artificial latency applied to every simulated operation.
const DEFAULT_LATENCY: Duration = Duration::from_millis(150);

/// Deterministic, in-memory backend used for development and testing.
///
/// Enforces the same success/failure contract as the HTTP backend against a
/// fixed fixture set. Every operation awaits a non-blocking artificial delay
/// to emulate network latency; concurrent in-flight calls overlap rather
/// than queueing.
///
/// Cheap to clone; clones share the same fixture state.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    store: SimStore,
    latency: Duration,
}

impl SimulatedBackend {
    /// Create a backend seeded with the standard fixtures.
    pub fn new() -> Self {
        Self {
            store: SimStore::seeded(),
            latency: DEFAULT_LATENCY,
        }
    }

    /// Override the artificial latency (used by tests to keep suites fast).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn delay(&self) {
        tokio::time::sleep(self.latency).await;
    }

    fn authed_user(&self, token: Option<&AccessToken>) -> Result<UserRecord> {
        let subject = token::subject_of(token, Utc::now())?;
        self.store
            .find_by_id(&subject)
            .map(|u| u.record)
            .ok_or_else(|| Error::Unauthorized("unknown token subject".into()))
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatedBackend {
    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutput> {
        self.delay().await;
        debug!("Simulated login");

        let user = self
            .store
            .find_by_email(email)
            .filter(|u| u.password == password)
            .ok_or_else(|| Error::Unauthorized("invalid credentials".into()))?;

        Ok(LoginOutput {
            credential: token::mint_credential(&user.record.id, Utc::now()),
            user: user.record,
        })
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutput> {
        self.delay().await;
        debug!("Simulated registration");

        let role = request.role.unwrap_or(Role::Owner);
        let user_id = self.store.insert_user(
            &request.email,
            &request.password,
            &request.full_name,
            role,
        )?;

        Ok(RegisterOutput {
            message: "account created".into(),
            user_id,
            email_verification_required: false,
        })
    }

    #[instrument(skip_all)]
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<Credential> {
        self.delay().await;
        debug!("Simulated token refresh");

        let subject = token::refresh_subject(refresh_token)?;
        Ok(token::mint_credential(&subject, Utc::now()))
    }

    #[instrument(skip_all)]
    async fn logout(&self, _token: Option<&AccessToken>) -> Result<()> {
        self.delay().await;
        debug!("Simulated logout");
        Ok(())
    }

    #[instrument(skip_all)]
    async fn me(&self, token: Option<&AccessToken>) -> Result<UserRecord> {
        self.delay().await;
        self.authed_user(token)
    }

    #[instrument(skip_all)]
    async fn list_licenses(&self, token: Option<&AccessToken>) -> Result<Vec<License>> {
        self.delay().await;
        let user = self.authed_user(token)?;
        Ok(self.store.licenses_for(&user.id))
    }

    #[instrument(skip(self, token))]
    async fn get_license(&self, token: Option<&AccessToken>, id: &str) -> Result<License> {
        self.delay().await;
        let user = self.authed_user(token)?;
        self.store.get_license(&user.id, id)
    }

    #[instrument(skip_all)]
    async fn create_license(
        &self,
        token: Option<&AccessToken>,
        application: &LicenseApplication,
    ) -> Result<License> {
        self.delay().await;
        let user = self.authed_user(token)?;
        Ok(self.store.insert_license(&user.id, application))
    }
}
