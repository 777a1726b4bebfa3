// src/application/state.rs

use std::sync::Arc;

use crate::config::PaginationConfig;
use crate::db::ConnectionPool;
use crate::domain::PageRequest;
use crate::repositories::{
    MovieRepository, ScoreRepository, SqliteMovieRepository, SqliteScoreRepository,
    SqliteUserRepository, UserRepository,
};
use crate::services::{MovieService, ScoreService, UserService};

/// Services shared by every command.
/// All fields are Arc-wrapped for thread-safe sharing across requests.
pub struct AppState {
    pub movie_service: Arc<MovieService>,
    pub score_service: Arc<ScoreService>,
    pub user_service: Arc<UserService>,
    pub pagination: PaginationConfig,
}

impl AppState {
    /// Wire the SQLite repositories and services over one pool
    pub fn from_pool(pool: Arc<ConnectionPool>, pagination: PaginationConfig) -> Self {
        let movie_repo: Arc<dyn MovieRepository> = Arc::new(SqliteMovieRepository::new(pool.clone()));
        let score_repo: Arc<dyn ScoreRepository> = Arc::new(SqliteScoreRepository::new(pool.clone()));
        let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool));

        let user_service = Arc::new(UserService::new(user_repo));
        let movie_service = Arc::new(MovieService::new(movie_repo.clone()));
        let score_service = Arc::new(ScoreService::new(
            user_service.clone(),
            movie_repo,
            score_repo,
        ));

        Self {
            movie_service,
            score_service,
            user_service,
            pagination,
        }
    }

    /// Page selector with configured default and cap applied
    pub fn page_request(&self, page: Option<u32>, size: Option<u32>) -> PageRequest {
        PageRequest::new(
            page.unwrap_or(0),
            size.unwrap_or(self.pagination.default_page_size),
        )
        .capped(self.pagination.max_page_size)
    }
}
