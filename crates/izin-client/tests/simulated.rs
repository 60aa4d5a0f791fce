//! End-to-end tests of the full client over the simulated backend.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use izin_client::{BackendRouter, MemoryTokenStore, SessionClient};
use izin_core::{
    AccessToken, Credential, Error, LicenseApplication, LicenseKind, RefreshToken,
    RegisterRequest, Role, SessionState, TokenStore,
};
use izin_sim::SimulatedBackend;

fn simulated_client() -> (SessionClient, Arc<MemoryTokenStore>) {
    let backend = SimulatedBackend::new().with_latency(Duration::ZERO);
    let router = BackendRouter::with_backend(Arc::new(backend));
    let store = Arc::new(MemoryTokenStore::new());
    (SessionClient::new(router, store.clone()), store)
}

/// An expired JWT-shaped token for the given subject.
fn expired_access_token(sub: &str) -> AccessToken {
    let exp = Utc::now().timestamp() - 60;
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{sub}","exp":{exp}}}"#));
    AccessToken::new(format!("{header}.{payload}.sim"))
}

#[tokio::test]
async fn full_session_lifecycle() {
    let (client, store) = simulated_client();
    assert_eq!(client.session_state(), SessionState::Anonymous);

    let user = client
        .login("tuti@warungmaju.id", "rahasia123")
        .await
        .unwrap();
    assert_eq!(user.role, Role::Owner);
    assert_eq!(client.session_state(), SessionState::Authenticated);

    let me = client.me().await.unwrap();
    assert_eq!(me, user);

    let licenses = client.list_licenses().await.unwrap();
    assert_eq!(licenses.len(), 1);

    let fetched = client.get_license(&licenses[0].id).await.unwrap();
    assert_eq!(fetched, licenses[0]);

    let created = client
        .apply_for_license(&LicenseApplication {
            kind: LicenseKind::FoodProduction,
            business_name: "Warung Maju".into(),
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(created.owner_id, user.id);
    assert_eq!(client.list_licenses().await.unwrap().len(), 2);

    client.logout().await.unwrap();
    assert_eq!(client.session_state(), SessionState::Anonymous);
    assert!(store.get().is_none());
}

#[tokio::test]
async fn invalid_login_is_unauthorized_and_persists_nothing() {
    let (client, store) = simulated_client();

    let err = client
        .login("admin@saasumkm.com", "wrong")
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert!(store.get().is_none());
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let (client, _store) = simulated_client();
    let request = RegisterRequest {
        email: "baru@toko.id".into(),
        password: "pw123".into(),
        full_name: "Pemilik Baru".into(),
        role: None,
    };

    let output = client.register(&request).await.unwrap();
    assert!(!output.user_id.is_empty());

    let err = client.register(&request).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn stale_simulated_session_refreshes_transparently() {
    let (client, store) = simulated_client();

    let user = client
        .login("tuti@warungmaju.id", "rahasia123")
        .await
        .unwrap();
    let real_refresh = store.get().unwrap().refresh_token;

    // Replace the access token with an expired one, keeping the valid
    // simulated refresh token.
    store
        .set(
            Credential {
                access_token: expired_access_token(&user.id),
                refresh_token: real_refresh,
                expires_at: Utc::now() - chrono::Duration::minutes(1),
            },
            user.clone(),
        )
        .unwrap();
    assert_eq!(client.session_state(), SessionState::Stale);

    // The call succeeds after a silent refresh and the credential rotated.
    let me = client.me().await.unwrap();
    assert_eq!(me.id, user.id);
    assert_eq!(client.session_state(), SessionState::Authenticated);
}

#[tokio::test]
async fn invalid_refresh_token_ends_the_session() {
    let (client, store) = simulated_client();

    let user = client
        .login("tuti@warungmaju.id", "rahasia123")
        .await
        .unwrap();

    store
        .set(
            Credential {
                access_token: expired_access_token(&user.id),
                refresh_token: RefreshToken::new("not-a-simulated-token"),
                expires_at: Utc::now() - chrono::Duration::minutes(1),
            },
            user,
        )
        .unwrap();

    let err = client.me().await.unwrap_err();
    assert!(matches!(err, Error::SessionEnded));
    assert_eq!(client.session_state(), SessionState::Anonymous);
}

#[tokio::test]
async fn missing_license_is_not_found() {
    let (client, _store) = simulated_client();
    client
        .login("admin@saasumkm.com", "password")
        .await
        .unwrap();

    let err = client.get_license("lic-9999").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
