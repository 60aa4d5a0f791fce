//! CLI command implementations.

pub mod licenses;
pub mod login;
pub mod logout;
pub mod register;
pub mod whoami;
