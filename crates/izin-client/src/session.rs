//! The session client: token attachment, silent refresh, and termination.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use izin_core::error::TransportError;
use izin_core::{
    AccessToken, Error, License, LicenseApplication, RegisterOutput, RegisterRequest, Result,
    SessionState, TokenStore, UserRecord, expiry,
};

use crate::config::{ClientConfig, DEFAULT_REFRESH_TIMEOUT};
use crate::router::BackendRouter;

/// Per-chain progress through the refresh-and-retry pipeline.
///
/// Each logical operation runs exactly one chain. The chain is allowed one
/// refresh and one retry; a second authorization failure after a successful
/// refresh is returned as-is, which guarantees termination.
enum ChainState {
    /// About to send with the current token (or unauthenticated).
    Attaching,
    /// An authorization failure was received (or the stored token is already
    /// stale); the chain's single refresh is pending.
    AwaitingRefresh,
    /// Refresh succeeded; the original call is reissued exactly once.
    Retrying,
}

/// The request/response pipeline every feature calls through.
///
/// Attaches the current access token to outgoing calls; on an authorization
/// failure performs a bounded, single-attempt silent refresh before retrying
/// the original call once. If the refresh (or anything after it that the
/// pipeline owns) fails, stored credentials are cleared *before* the caller
/// sees the terminal [`Error::SessionEnded`].
///
/// Cheap to clone (internal `Arc`); clones share the token store and the
/// refresh gate, so concurrent chains collapse into a single in-flight
/// refresh.
#[derive(Clone)]
pub struct SessionClient {
    inner: Arc<Inner>,
}

struct Inner {
    router: BackendRouter,
    store: Arc<dyn TokenStore>,
    /// Serializes refreshes across chains. A chain that acquires the gate
    /// after a sibling already rotated the credential skips its own refresh.
    refresh_gate: Mutex<()>,
    refresh_timeout: Duration,
}

impl SessionClient {
    /// Create a client over the given router and token store.
    pub fn new(router: BackendRouter, store: Arc<dyn TokenStore>) -> Self {
        Self::with_refresh_timeout(router, store, DEFAULT_REFRESH_TIMEOUT)
    }

    /// Create a client with an explicit refresh timeout.
    pub fn with_refresh_timeout(
        router: BackendRouter,
        store: Arc<dyn TokenStore>,
        refresh_timeout: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                router,
                store,
                refresh_gate: Mutex::new(()),
                refresh_timeout,
            }),
        }
    }

    /// Create a client from configuration.
    pub fn from_config(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let router = BackendRouter::from_config(config)?;
        Ok(Self::with_refresh_timeout(
            router,
            store,
            config.refresh_timeout,
        ))
    }

    /// Derive the current session state from token-store contents.
    ///
    /// Pure function of the store at query time; never cached.
    pub fn session_state(&self) -> SessionState {
        match self.inner.store.get() {
            None => SessionState::Anonymous,
            Some(credential) => {
                if expiry::is_usable(credential.access_token.as_str()) {
                    SessionState::Authenticated
                } else {
                    SessionState::Stale
                }
            }
        }
    }

    /// Authenticate and persist the returned credential and user record.
    ///
    /// An `Unauthorized` from login itself is returned directly; it never
    /// triggers a refresh.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserRecord> {
        info!("Logging in");

        let output = self.inner.router.backend().login(email, password).await?;
        self.inner
            .store
            .set(output.credential, output.user.clone())?;

        debug!(user_id = %output.user.id, "Session established");
        Ok(output.user)
    }

    /// Register a new account. Does not log in; the register response
    /// carries no tokens.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutput> {
        self.inner.router.backend().register(request).await
    }

    /// End the session. The server-side call is best-effort; local
    /// credentials are cleared regardless of its outcome.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        info!("Logging out");

        let token = self.inner.store.get().map(|c| c.access_token);
        if let Err(err) = self.inner.router.backend().logout(token.as_ref()).await {
            warn!(error = %err, "Best-effort logout call failed");
        }

        self.inner.store.clear()
    }

    /// Fetch the authenticated user's record.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<UserRecord> {
        let backend = self.inner.router.handle();
        self.run_chain(move |token| {
            let backend = Arc::clone(&backend);
            async move { backend.me(token.as_ref()).await }
        })
        .await
    }

    /// List the caller's license records.
    #[instrument(skip(self))]
    pub async fn list_licenses(&self) -> Result<Vec<License>> {
        let backend = self.inner.router.handle();
        self.run_chain(move |token| {
            let backend = Arc::clone(&backend);
            async move { backend.list_licenses(token.as_ref()).await }
        })
        .await
    }

    /// Fetch a single license record by id.
    #[instrument(skip(self))]
    pub async fn get_license(&self, id: &str) -> Result<License> {
        let backend = self.inner.router.handle();
        let id = id.to_string();
        self.run_chain(move |token| {
            let backend = Arc::clone(&backend);
            let id = id.clone();
            async move { backend.get_license(token.as_ref(), &id).await }
        })
        .await
    }

    /// Submit a new license application.
    #[instrument(skip(self, application))]
    pub async fn apply_for_license(&self, application: &LicenseApplication) -> Result<License> {
        let backend = self.inner.router.handle();
        let application = application.clone();
        self.run_chain(move |token| {
            let backend = Arc::clone(&backend);
            let application = application.clone();
            async move { backend.create_license(token.as_ref(), &application).await }
        })
        .await
    }

    /// Drive one call chain through the state machine.
    async fn run_chain<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: Fn(Option<AccessToken>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut state = ChainState::Attaching;
        // The token attached on the last attempt; lets the refresh step see
        // whether a sibling chain rotated the credential in the meantime.
        let mut seen_token: Option<String> = None;

        loop {
            match state {
                ChainState::Attaching => {
                    let credential = self.inner.store.get();

                    // A present-but-expired credential would be rejected
                    // anyway; spend the chain's single refresh up front.
                    if let Some(ref credential) = credential {
                        if !expiry::is_usable(credential.access_token.as_str()) {
                            debug!("Stored access token is stale; refreshing before send");
                            seen_token = Some(credential.access_token.as_str().to_string());
                            state = ChainState::AwaitingRefresh;
                            continue;
                        }
                    }

                    let token = credential.map(|c| c.access_token);
                    seen_token = token.as_ref().map(|t| t.as_str().to_string());

                    match op(token).await {
                        Err(err) if err.is_unauthorized() => {
                            debug!("Authorization failure; attempting silent refresh");
                            state = ChainState::AwaitingRefresh;
                        }
                        result => return result,
                    }
                }
                ChainState::AwaitingRefresh => {
                    self.refresh_once(seen_token.as_deref()).await?;
                    state = ChainState::Retrying;
                }
                ChainState::Retrying => {
                    let token = self.inner.store.get().map(|c| c.access_token);
                    // Whatever the retried call produces is returned as-is;
                    // this chain's refresh budget is spent.
                    return op(token).await;
                }
            }
        }
    }

    /// The chain's single refresh attempt. On failure the store is cleared
    /// before the terminal error is reported, so no later call can run with
    /// stale tokens.
    async fn refresh_once(&self, seen_token: Option<&str>) -> Result<()> {
        let _gate = self.inner.refresh_gate.lock().await;

        // A sibling chain may have refreshed while we waited on the gate.
        if let Some(current) = self.inner.store.get() {
            let rotated = Some(current.access_token.as_str()) != seen_token;
            if rotated && expiry::is_usable(current.access_token.as_str()) {
                debug!("Credential already rotated by a concurrent chain");
                return Ok(());
            }
        }

        match self.try_refresh().await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(error = %err, "Refresh failed; ending session");
                if let Err(clear_err) = self.inner.store.clear() {
                    warn!(error = %clear_err, "Failed to clear token store");
                }
                Err(Error::SessionEnded)
            }
        }
    }

    async fn try_refresh(&self) -> Result<()> {
        let credential = self
            .inner
            .store
            .get()
            .ok_or_else(|| Error::Unauthorized("no refresh token available".into()))?;
        let user = self
            .inner
            .store
            .user()
            .ok_or_else(|| Error::Storage("user record missing from session store".into()))?;

        info!("Refreshing session tokens");

        let refresh = self
            .inner
            .router
            .backend()
            .refresh(&credential.refresh_token);
        let fresh = tokio::time::timeout(self.inner.refresh_timeout, refresh)
            .await
            .map_err(|_| {
                Error::Transport(TransportError::Timeout {
                    duration_ms: self.inner.refresh_timeout.as_millis() as u64,
                })
            })??;

        self.inner.store.set(fresh, user)?;
        debug!("Session tokens rotated");
        Ok(())
    }
}

impl std::fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("state", &self.session_state())
            .finish_non_exhaustive()
    }
}
