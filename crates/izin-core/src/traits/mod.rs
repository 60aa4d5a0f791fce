//! Trait seams between the client and its collaborators.

mod backend;
mod store;

pub use backend::{Backend, LoginOutput, RegisterOutput, RegisterRequest};
pub use store::TokenStore;
