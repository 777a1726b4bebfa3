// src/services/user_service.rs
//
// User directory and authenticated-user resolution

use std::sync::Arc;

use crate::domain::{User, UserDetails};
use crate::error::{AppError, AppResult};
use crate::repositories::UserRepository;
use crate::security::{RequestContext, UserDetailsProvider};

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Resolve the caller to a stored user
    ///
    /// Any failure to read the identity, and an identity with no matching
    /// user, is an `Authentication` error.
    pub fn authenticated(&self, ctx: &RequestContext) -> AppResult<User> {
        let username = ctx.logged_username().map_err(|e| {
            log::debug!("Identity resolution failed: {}", e);
            AppError::Authentication("Invalid user".to_string())
        })?;

        match self.user_repo.find_by_username(username)? {
            Some(user) => Ok(user),
            None => {
                log::debug!("No user record for '{}'", username);
                Err(AppError::Authentication("Invalid user".to_string()))
            }
        }
    }

    /// Resolve the caller and require a granted authority
    pub fn require_role(&self, ctx: &RequestContext, authority: &str) -> AppResult<User> {
        self.require_any_role(ctx, &[authority])
    }

    /// Resolve the caller and require at least one of `authorities`
    pub fn require_any_role(&self, ctx: &RequestContext, authorities: &[&str]) -> AppResult<User> {
        let user = self.authenticated(ctx)?;

        if !authorities.iter().any(|a| user.has_role(a)) {
            log::warn!("User '{}' lacks any of {:?}", user.username, authorities);
            return Err(AppError::Forbidden(format!(
                "One of {} required",
                authorities.join(", ")
            )));
        }

        Ok(user)
    }

    /// Credential hash and roles for a login decision
    pub fn load_user_by_username(&self, username: &str) -> AppResult<UserDetails> {
        let rows = self.user_repo.search_user_and_roles_by_username(username)?;

        UserDetails::from_projections(&rows)
            .ok_or_else(|| AppError::not_found(format!("User '{}'", username)))
    }
}

impl UserDetailsProvider for UserService {
    fn load_user_by_username(&self, username: &str) -> AppResult<UserDetails> {
        UserService::load_user_by_username(self, username)
    }
}
