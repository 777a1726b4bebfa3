// src/services/score_service.rs
//
// Score submission and movie aggregate maintenance

use std::sync::Arc;

use crate::domain::{validate_score, Movie, Score};
use crate::error::{AppError, AppResult};
use crate::repositories::{MovieRepository, ScoreRepository};
use crate::security::RequestContext;
use crate::services::UserService;

pub struct ScoreService {
    user_service: Arc<UserService>,
    movie_repo: Arc<dyn MovieRepository>,
    score_repo: Arc<dyn ScoreRepository>,
}

impl ScoreService {
    pub fn new(
        user_service: Arc<UserService>,
        movie_repo: Arc<dyn MovieRepository>,
        score_repo: Arc<dyn ScoreRepository>,
    ) -> Self {
        Self {
            user_service,
            movie_repo,
            score_repo,
        }
    }

    /// Record the caller's rating of a movie and return the movie with its
    /// refreshed score and count.
    ///
    /// A second rating by the same user replaces the first.
    pub fn save_score(&self, ctx: &RequestContext, movie_id: i64, value: f64) -> AppResult<Movie> {
        let user = self.user_service.authenticated(ctx)?;

        let score = Score::new(movie_id, user.id, value);
        validate_score(&score)?;

        if self.movie_repo.find_by_id(movie_id)?.is_none() {
            return Err(AppError::not_found(format!("Movie {}", movie_id)));
        }

        let movie = self.score_repo.save_and_aggregate(&score)?;
        log::info!(
            "User '{}' rated movie {} with {} (count={}, score={:.2})",
            user.username,
            movie.id,
            value,
            movie.count,
            movie.score
        );

        Ok(movie)
    }

    /// The caller's current rating of a movie, if any
    pub fn find_user_score(&self, ctx: &RequestContext, movie_id: i64) -> AppResult<Option<Score>> {
        let user = self.user_service.authenticated(ctx)?;

        if !self.movie_repo.exists_by_id(movie_id)? {
            return Err(AppError::not_found(format!("Movie {}", movie_id)));
        }

        self.score_repo.find_by_movie_and_user(movie_id, user.id)
    }
}
