//! Token store trait.

use crate::Result;
use crate::credential::{Credential, UserRecord};

/// Durable holder for the current credential set.
///
/// No logic beyond get/set/clear lives here; validity is the expiry
/// inspector's job. `set` replaces the credential and cached user together,
/// and implementations must make it atomic from the caller's perspective: a
/// reader never observes an access token paired with a mismatched refresh
/// token.
///
/// Reads are lenient (an unreadable store reads as empty); writes surface
/// failures as [`Error::Storage`](crate::Error::Storage).
pub trait TokenStore: Send + Sync {
    /// Returns the stored credential, if any.
    fn get(&self) -> Option<Credential>;

    /// Returns the cached user record, if any.
    fn user(&self) -> Option<UserRecord>;

    /// Replace the stored credential and cached user atomically.
    fn set(&self, credential: Credential, user: UserRecord) -> Result<()>;

    /// Remove the credential and cached user together.
    fn clear(&self) -> Result<()>;
}
