//! Client configuration.

use std::time::Duration;

use izin_core::BaseUrl;

/// How long a refresh call may run before it is abandoned. A hung refresh
/// would otherwise hang every chain waiting on it.
pub(crate) const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for constructing a [`SessionClient`](crate::SessionClient).
///
/// The whole surface is intentionally small: the real backend's base URL and
/// one flag selecting simulated vs. real dispatch.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the real licensing service. Required unless `simulate`
    /// is set.
    pub base_url: Option<BaseUrl>,
    /// Route all calls to the deterministic simulated backend.
    pub simulate: bool,
    /// Upper bound on a single token-refresh call.
    pub refresh_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            simulate: false,
            refresh_timeout: DEFAULT_REFRESH_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Configuration for the simulated backend.
    pub fn simulated() -> Self {
        Self {
            simulate: true,
            ..Self::default()
        }
    }

    /// Configuration for the real backend at the given base URL.
    pub fn remote(base_url: BaseUrl) -> Self {
        Self {
            base_url: Some(base_url),
            ..Self::default()
        }
    }
}
