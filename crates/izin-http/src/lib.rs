//! izin-http - HTTP backend for the izin licensing client.
//!
//! Implements the [`Backend`](izin_core::Backend) trait against the real
//! licensing service, translating HTTP statuses into the shared error
//! taxonomy so callers see the exact same shapes the simulated backend
//! produces.

mod backend;
mod client;
mod wire;

pub use backend::HttpBackend;
