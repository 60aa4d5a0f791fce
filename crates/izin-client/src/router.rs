//! Backend dispatch.

use std::fmt;
use std::sync::Arc;

use izin_core::{Backend, BaseUrl, Error, Result};
use izin_http::HttpBackend;
use izin_sim::SimulatedBackend;

use crate::config::ClientConfig;

/// Routes every operation to one backend implementation.
///
/// The implementation is an injected strategy object chosen at construction
/// time, not a process-wide flag, so tests can run the simulated and the
/// real backend side by side. Both implementations expose the identical
/// operation set and error shapes; swapping one for the other changes only
/// the source of the data.
#[derive(Clone)]
pub struct BackendRouter {
    backend: Arc<dyn Backend>,
}

impl BackendRouter {
    /// Route to a freshly seeded simulated backend.
    pub fn simulated() -> Self {
        Self::with_backend(Arc::new(SimulatedBackend::new()))
    }

    /// Route to the real service at the given base URL.
    pub fn remote(base_url: BaseUrl) -> Self {
        Self::with_backend(Arc::new(HttpBackend::new(base_url)))
    }

    /// Route to an explicit backend implementation.
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Resolve the backend from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        if config.simulate {
            return Ok(Self::simulated());
        }

        match &config.base_url {
            Some(base_url) => Ok(Self::remote(base_url.clone())),
            None => Err(Error::Validation(
                "base_url is required when simulation is disabled".into(),
            )),
        }
    }

    /// Borrow the active backend.
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Clone a shared handle to the active backend.
    pub(crate) fn handle(&self) -> Arc<dyn Backend> {
        Arc::clone(&self.backend)
    }
}

impl fmt::Debug for BackendRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRouter").finish_non_exhaustive()
    }
}
