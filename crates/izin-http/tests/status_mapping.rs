//! Mock-server tests for the HTTP backend.
//!
//! These verify that each endpoint speaks the documented wire shape and that
//! every status the service can return maps to the right error variant, so
//! callers observe the same taxonomy the simulated backend produces.

use izin_core::{AccessToken, Backend, BaseUrl, Error, RefreshToken, RegisterRequest};
use izin_http::HttpBackend;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(BaseUrl::new(server.uri()).unwrap())
}

fn login_body() -> serde_json::Value {
    json!({
        "access_token": "access-1",
        "refresh_token": "refresh-1",
        "expires_at": "2026-08-30T12:00:00Z",
        "user": {
            "id": "usr-0001",
            "email": "admin@saasumkm.com",
            "full_name": "Administrator SaaS UMKM",
            "role": "admin"
        }
    })
}

#[tokio::test]
async fn login_parses_tokens_and_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "admin@saasumkm.com",
            "password": "password"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let output = backend
        .login("admin@saasumkm.com", "password")
        .await
        .unwrap();

    assert_eq!(output.credential.access_token.as_str(), "access-1");
    assert_eq!(output.credential.refresh_token.as_str(), "refresh-1");
    assert_eq!(output.user.email, "admin@saasumkm.com");
}

#[tokio::test]
async fn login_401_maps_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "unauthorized",
            "message": "invalid credentials"
        })))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .login("admin@saasumkm.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(ref m) if m == "invalid credentials"));
}

#[tokio::test]
async fn register_409_maps_to_conflict() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "email already exists"
        })))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .register(&RegisterRequest {
            email: "admin@saasumkm.com".into(),
            password: "pw".into(),
            full_name: "Dup".into(),
            role: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn missing_license_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/licenses/lic-9999"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "license 'lic-9999' not found"
        })))
        .mount(&server)
        .await;

    let token = AccessToken::new("access-1");
    let err = backend_for(&server)
        .get_license(Some(&token), "lic-9999")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn validation_statuses_map_to_validation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "email is not valid"
        })))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .register(&RegisterRequest {
            email: "not-an-email".into(),
            password: "pw".into(),
            full_name: "X".into(),
            role: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn unnamed_statuses_pass_through_as_unexpected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Internal Server Error")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let token = AccessToken::new("access-1");
    let err = backend_for(&server).me(Some(&token)).await.unwrap_err();
    // Non-JSON error bodies are handled gracefully too.
    assert!(matches!(err, Error::Unexpected { status: 500, .. }));
}

#[tokio::test]
async fn refresh_sends_the_refresh_token_in_the_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({ "refresh_token": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-2",
            "refresh_token": "refresh-2",
            "expires_at": "2026-08-30T12:15:00Z"
        })))
        .mount(&server)
        .await;

    let credential = backend_for(&server)
        .refresh(&RefreshToken::new("refresh-1"))
        .await
        .unwrap();
    assert_eq!(credential.access_token.as_str(), "access-2");
    assert_eq!(credential.refresh_token.as_str(), "refresh-2");
}

#[tokio::test]
async fn unauthenticated_calls_omit_the_bearer_header() {
    let server = MockServer::start().await;

    // Reject any request carrying an authorization header.
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(wiremock::matchers::header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .mount(&server)
        .await;

    let output = backend_for(&server)
        .login("admin@saasumkm.com", "password")
        .await;
    assert!(output.is_ok());
}
