//! HTTP backend implementation.

use async_trait::async_trait;
use tracing::instrument;

use izin_core::{
    AccessToken, Backend, BaseUrl, Credential, License, LicenseApplication, LoginOutput,
    RefreshToken, RegisterOutput, RegisterRequest, Result, UserRecord,
};

use crate::client::HttpClient;
use crate::wire::{
    LoginBody, LoginResponse, RefreshBody, RefreshResponse, RegisterBody, RegisterResponse,
};

const LOGIN: &str = "/auth/login";
const REGISTER: &str = "/auth/register";
const REFRESH: &str = "/auth/refresh";
const LOGOUT: &str = "/auth/logout";
const ME: &str = "/me";
const LICENSES: &str = "/licenses";

/// Backend implementation against the real licensing service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: HttpClient,
}

impl HttpBackend {
    /// Create a backend for the given service base URL.
    pub fn new(base: BaseUrl) -> Self {
        Self {
            client: HttpClient::new(base),
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutput> {
        let body = LoginBody { email, password };
        let response: LoginResponse = self.client.post_json(LOGIN, &body, None).await?;
        Ok(response.into())
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutput> {
        let body = RegisterBody {
            email: &request.email,
            password: &request.password,
            full_name: &request.full_name,
            role: request.role,
        };
        let response: RegisterResponse = self.client.post_json(REGISTER, &body, None).await?;
        Ok(response.into())
    }

    #[instrument(skip_all)]
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<Credential> {
        let body = RefreshBody {
            refresh_token: refresh_token.as_str(),
        };
        let response: RefreshResponse = self.client.post_json(REFRESH, &body, None).await?;
        Ok(response.into())
    }

    #[instrument(skip_all)]
    async fn logout(&self, token: Option<&AccessToken>) -> Result<()> {
        self.client.post_empty(LOGOUT, token).await
    }

    #[instrument(skip_all)]
    async fn me(&self, token: Option<&AccessToken>) -> Result<UserRecord> {
        self.client.get_json(ME, token).await
    }

    #[instrument(skip_all)]
    async fn list_licenses(&self, token: Option<&AccessToken>) -> Result<Vec<License>> {
        self.client.get_json(LICENSES, token).await
    }

    #[instrument(skip(self, token))]
    async fn get_license(&self, token: Option<&AccessToken>, id: &str) -> Result<License> {
        self.client
            .get_json(&format!("{LICENSES}/{id}"), token)
            .await
    }

    #[instrument(skip_all)]
    async fn create_license(
        &self,
        token: Option<&AccessToken>,
        application: &LicenseApplication,
    ) -> Result<License> {
        self.client.post_json(LICENSES, application, token).await
    }
}
