// src/domain/mod.rs
//
// Domain Root - entities, value objects and invariants
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod movie;
pub mod page;
pub mod score;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Movie Domain
pub use movie::{validate_movie, validate_movie_details, Movie, MovieDetails};

// Score Domain
pub use score::{validate_score, Score, ScoreAggregate, MAX_SCORE, MIN_SCORE};

// User Domain
pub use user::{Role, User, UserDetails, UserDetailsProjection};

// Pagination
pub use page::{Page, PageRequest};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
