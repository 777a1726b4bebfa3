// src/security/mod.rs
//
// Caller identity, passed explicitly to every identity-dependent call

pub mod context;
pub mod provider;

pub use context::{RequestContext, USERNAME_CLAIM};
pub use provider::UserDetailsProvider;
