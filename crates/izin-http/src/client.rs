//! HTTP plumbing shared by all backend operations.

use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use izin_core::error::TransportError;
use izin_core::{AccessToken, BaseUrl, Error, Result};

use crate::wire::ErrorBody;

/// Thin wrapper over `reqwest::Client` that attaches bearer tokens and maps
/// responses into the shared error taxonomy.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    base: BaseUrl,
}

impl HttpClient {
    pub fn new(base: BaseUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("izin/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// GET a JSON resource.
    pub async fn get_json<R>(&self, path: &str, token: Option<&AccessToken>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "HTTP GET");

        let mut request = self.client.get(&url);
        request = attach_bearer(request, token);

        let response = request.send().await.map_err(map_transport)?;
        handle_response(response).await
    }

    /// POST a JSON body and parse a JSON response.
    pub async fn post_json<B, R>(
        &self,
        path: &str,
        body: &B,
        token: Option<&AccessToken>,
    ) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "HTTP POST");

        let mut request = self.client.post(&url).json(body);
        request = attach_bearer(request, token);

        let response = request.send().await.map_err(map_transport)?;
        handle_response(response).await
    }

    /// POST with no body and no expected response content.
    pub async fn post_empty(&self, path: &str, token: Option<&AccessToken>) -> Result<()> {
        let url = self.base.endpoint(path);
        debug!(path, "HTTP POST (empty)");

        let mut request = self.client.post(&url);
        request = attach_bearer(request, token);

        let response = request.send().await.map_err(map_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }
}

fn attach_bearer(
    request: reqwest::RequestBuilder,
    token: Option<&AccessToken>,
) -> reqwest::RequestBuilder {
    match token {
        Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token.as_str())),
        None => request,
    }
}

/// Parse a success body or translate the error status.
async fn handle_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
    let status = response.status();
    trace!(status = %status, "HTTP response");

    if status.is_success() {
        response.json::<R>().await.map_err(map_transport)
    } else {
        Err(error_from_response(response).await)
    }
}

/// Map a non-success response into the shared taxonomy. Only 401 is treated
/// as an authorization failure; everything the taxonomy does not name passes
/// through as `Unexpected`.
async fn error_from_response(response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    let body: ErrorBody = response.json().await.unwrap_or_default();
    let message = body
        .message
        .or(body.error)
        .unwrap_or_else(|| "no error detail".to_string());

    match status {
        401 => Error::Unauthorized(message),
        404 => Error::NotFound(message),
        409 => Error::Conflict(message),
        400 | 422 => Error::Validation(message),
        _ => Error::Unexpected {
            status,
            message: Some(message),
        },
    }
}

/// Map reqwest failures (no response received) into transport errors.
fn map_transport(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout { duration_ms: 0 }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
