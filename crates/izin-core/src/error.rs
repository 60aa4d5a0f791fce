//! Error types for the izin client.
//!
//! This module provides a unified error type with one variant per failure
//! class the backends can report, plus the transport and storage failure
//! modes the client itself produces. `SessionClient` recovers from exactly
//! one [`Error::Unauthorized`] per call chain by refreshing; every other
//! variant is passed through to the caller unchanged.

use thiserror::Error;

/// The unified error type for izin operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The presented credentials or access token were rejected.
    ///
    /// When received in response to an authenticated call this triggers the
    /// single silent refresh; from `login` or `refresh` themselves it is
    /// returned directly.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A uniqueness constraint was violated (duplicate registration).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request was malformed or failed server-side validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Network transport errors (connection, TLS, timeout).
    ///
    /// No response was received, so nothing can be inferred about the token;
    /// transport errors never trigger a refresh.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The local token store failed to persist or clear credentials.
    #[error("storage error: {0}")]
    Storage(String),

    /// A response status outside the mapped taxonomy (e.g. 500).
    #[error("unexpected response: HTTP {status}")]
    Unexpected {
        status: u16,
        message: Option<String>,
    },

    /// The session was terminated: a refresh attempt failed and the stored
    /// credentials have been cleared.
    #[error("session ended")]
    SessionEnded,
}

impl Error {
    /// Check whether this is an authorization failure (401-equivalent).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized(_))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP-level transport error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}
