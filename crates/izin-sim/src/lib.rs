//! izin-sim - Deterministic simulated backend.
//!
//! An in-memory implementation of the full [`Backend`](izin_core::Backend)
//! operation set, used for development and testing. It enforces the same
//! success/failure contract as the HTTP backend but runs against fixed
//! fixture data and a non-blocking artificial latency.

mod backend;
mod store;
mod token;

pub use backend::SimulatedBackend;
