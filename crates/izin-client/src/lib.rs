//! izin-client - Session and token lifecycle management.
//!
//! This crate provides the request/response pipeline every feature of the
//! licensing front end calls through: [`SessionClient`] attaches the current
//! access token to outgoing calls, performs a bounded single-attempt silent
//! refresh on authorization failure, and clears credentials on terminal
//! failure. [`BackendRouter`] decides whether calls reach the simulated or
//! the real backend; callers cannot tell which is active.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use izin_client::{BackendRouter, MemoryTokenStore, SessionClient};
//!
//! # async fn example() -> Result<(), izin_core::Error> {
//! let router = BackendRouter::simulated();
//! let client = SessionClient::new(router, Arc::new(MemoryTokenStore::new()));
//!
//! let user = client.login("admin@saasumkm.com", "password").await?;
//! println!("Signed in as {}", user.full_name);
//!
//! for license in client.list_licenses().await? {
//!     println!("{}: {}", license.id, license.business_name);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod router;
mod session;
mod store;

pub use config::ClientConfig;
pub use router::BackendRouter;
pub use session::SessionClient;
pub use store::{FileTokenStore, MemoryTokenStore};
