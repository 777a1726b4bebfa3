// src/security/context.rs
//
// Per-request security context
//
// The claims are whatever an upstream verifier (JWT filter, session layer,
// CLI flag) vouched for. Nothing here checks credentials.

use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Claim that carries the login name
pub const USERNAME_CLAIM: &str = "username";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    claims: Option<Map<String, Value>>,
}

impl RequestContext {
    /// A request with no identity attached
    pub fn anonymous() -> Self {
        Self { claims: None }
    }

    /// A request carrying verified claims
    pub fn with_claims(claims: Map<String, Value>) -> Self {
        Self {
            claims: Some(claims),
        }
    }

    /// Shorthand for a context whose only claim is the username
    pub fn for_username(username: impl Into<String>) -> Self {
        let mut claims = Map::new();
        claims.insert(USERNAME_CLAIM.to_string(), Value::String(username.into()));
        Self::with_claims(claims)
    }

    /// The caller's username
    ///
    /// Fails when the request is anonymous or the claim is missing, not a
    /// string, or blank.
    pub fn logged_username(&self) -> AppResult<&str> {
        let claims = self
            .claims
            .as_ref()
            .ok_or_else(|| AppError::Authentication("No identity attached to request".to_string()))?;

        match claims.get(USERNAME_CLAIM) {
            Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.as_str()),
            Some(_) => Err(AppError::Authentication(format!(
                "Malformed '{}' claim",
                USERNAME_CLAIM
            ))),
            None => Err(AppError::Authentication(format!(
                "Missing '{}' claim",
                USERNAME_CLAIM
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_for_username() {
        let ctx = RequestContext::for_username("maria@gmail.com");
        assert_eq!(ctx.logged_username().unwrap(), "maria@gmail.com");
    }

    #[test]
    fn test_anonymous_fails() {
        let err = RequestContext::anonymous().logged_username().unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[test]
    fn test_missing_claim_fails() {
        let ctx = RequestContext::with_claims(claims(json!({ "sub": "maria" })));
        assert!(matches!(ctx.logged_username(), Err(AppError::Authentication(_))));
    }

    #[test]
    fn test_malformed_claim_fails() {
        let ctx = RequestContext::with_claims(claims(json!({ "username": 42 })));
        assert!(matches!(ctx.logged_username(), Err(AppError::Authentication(_))));

        let blank = RequestContext::with_claims(claims(json!({ "username": "  " })));
        assert!(matches!(blank.logged_username(), Err(AppError::Authentication(_))));
    }

    #[test]
    fn test_extra_claims_do_not_interfere() {
        let ctx = RequestContext::with_claims(claims(json!({
            "username": "alex@gmail.com",
            "authorities": ["ROLE_CLIENT"]
        })));
        assert_eq!(ctx.logged_username().unwrap(), "alex@gmail.com");
    }
}
