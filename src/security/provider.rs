// src/security/provider.rs

use crate::domain::UserDetails;
use crate::error::AppResult;

/// Identity source for an external login handshake.
///
/// Given a username, return the stored credential hash and granted roles so
/// the handshake can verify the password and mint a token. `NotFound` for an
/// unknown username.
pub trait UserDetailsProvider: Send + Sync {
    fn load_user_by_username(&self, username: &str) -> AppResult<UserDetails>;
}
