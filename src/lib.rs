// src/lib.rs
// DSMovie - Movie catalog and rating backend
//
// Architecture:
// - Domain-centric: Movie, Score and User invariants live in domain/
// - Explicit identity: every identity-dependent call receives a RequestContext
// - Atomic aggregation: a rating and its movie aggregate commit together
// - Application Layer: transport boundary (DTOs, role checks, error mapping)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod security;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_movie,
    validate_movie_details,
    validate_score,
    // Movie
    Movie,
    MovieDetails,
    // Paging
    Page,
    PageRequest,
    // User
    Role,
    // Score
    Score,
    ScoreAggregate,
    User,
    UserDetails,
    UserDetailsProjection,
    MAX_SCORE,
    MIN_SCORE,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::AppConfig;

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, seed_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    MovieRepository,
    ScoreRepository,
    SqliteMovieRepository,
    SqliteScoreRepository,
    SqliteUserRepository,
    UserRepository,
};

// ============================================================================
// PUBLIC API - Security
// ============================================================================

pub use security::{RequestContext, UserDetailsProvider};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{MovieService, ScoreService, UserService};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

// Re-export application submodules
pub use application::commands;
pub use application::dto;
