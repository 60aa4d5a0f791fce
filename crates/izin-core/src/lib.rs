//! izin-core - Core types and traits for the izin licensing client.
//!
//! This crate defines the data model and the two seams the rest of the
//! workspace is built around: the [`Backend`] trait, implemented by both the
//! simulated and the HTTP backend, and the [`TokenStore`] trait, implemented
//! by the session stores in `izin-client`.

pub mod credential;
pub mod error;
pub mod expiry;
pub mod license;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credential::{Credential, Role, SessionState, UserRecord};
pub use error::Error;
pub use license::{License, LicenseApplication, LicenseKind, LicenseStatus};
pub use tokens::{AccessToken, RefreshToken};
pub use traits::{Backend, LoginOutput, RegisterOutput, RegisterRequest, TokenStore};
pub use types::BaseUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
