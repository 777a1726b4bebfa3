// src/repositories/score_repository.rs
//
// Score persistence and movie aggregate maintenance

use rusqlite::{params, OptionalExtension, TransactionBehavior};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::{validate_movie, Movie, Score, ScoreAggregate};
use crate::error::{AppError, AppResult};
use crate::repositories::movie_repository::SqliteMovieRepository;

#[cfg_attr(test, mockall::automock)]
pub trait ScoreRepository: Send + Sync {
    /// Upsert the score and refresh the movie's score/count from all of its
    /// score rows, atomically. Returns the updated movie.
    fn save_and_aggregate(&self, score: &Score) -> AppResult<Movie>;

    fn find_by_movie_and_user(&self, movie_id: i64, user_id: i64) -> AppResult<Option<Score>>;
}

pub struct SqliteScoreRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteScoreRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl ScoreRepository for SqliteScoreRepository {
    fn save_and_aggregate(&self, score: &Score) -> AppResult<Movie> {
        let mut conn = self.pool.get()?;

        // IMMEDIATE takes the write lock up front, so two submissions for the
        // same movie cannot both read the old score set.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Looked up under the write lock, so a concurrent delete surfaces as
        // NotFound rather than a foreign key failure on the insert.
        let mut movie = tx
            .query_row(
                "SELECT id, title, score, count, image FROM movies WHERE id = ?1",
                params![score.movie_id],
                SqliteMovieRepository::row_to_movie,
            )
            .optional()?
            .ok_or_else(|| AppError::not_found(format!("Movie {}", score.movie_id)))?;

        tx.execute(
            "INSERT INTO scores (movie_id, user_id, value) VALUES (?1, ?2, ?3)
             ON CONFLICT (movie_id, user_id) DO UPDATE SET value = excluded.value",
            params![score.movie_id, score.user_id, score.value],
        )?;

        let values: Vec<f64> = {
            let mut stmt = tx.prepare("SELECT value FROM scores WHERE movie_id = ?1")?;
            let rows = stmt.query_map(params![score.movie_id], |row| row.get(0))?;
            let values = rows.collect::<Result<Vec<_>, _>>()?;
            values
        };

        movie.apply_aggregate(ScoreAggregate::from_values(&values));
        validate_movie(&movie)?;

        tx.execute(
            "UPDATE movies SET score = ?1, count = ?2 WHERE id = ?3",
            params![movie.score, movie.count, movie.id],
        )?;

        tx.commit()?;

        log::debug!(
            "Movie {} aggregate refreshed: count={} score={:.3}",
            movie.id,
            movie.count,
            movie.score
        );

        Ok(movie)
    }

    fn find_by_movie_and_user(&self, movie_id: i64, user_id: i64) -> AppResult<Option<Score>> {
        let conn = self.pool.get()?;

        let score = conn
            .query_row(
                "SELECT movie_id, user_id, value FROM scores WHERE movie_id = ?1 AND user_id = ?2",
                params![movie_id, user_id],
                |row| {
                    Ok(Score {
                        movie_id: row.get("movie_id")?,
                        user_id: row.get("user_id")?,
                        value: row.get("value")?,
                    })
                },
            )
            .optional()?;

        Ok(score)
    }
}
