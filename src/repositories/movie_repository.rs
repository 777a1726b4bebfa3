// src/repositories/movie_repository.rs
//
// Movie persistence

use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::{Movie, MovieDetails, Page, PageRequest};
use crate::error::{AppError, AppResult};
use crate::repositories::{escape_like, is_foreign_key_violation};

#[cfg_attr(test, mockall::automock)]
pub trait MovieRepository: Send + Sync {
    fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>>;

    /// Case-insensitive substring match on title, ordered by id
    fn search_by_title(&self, title: &str, page: PageRequest) -> AppResult<Page<Movie>>;

    fn insert(&self, movie: &MovieDetails) -> AppResult<Movie>;

    /// Overwrite an existing row. `NotFound` if the id is unknown.
    fn save(&self, movie: &Movie) -> AppResult<Movie>;

    fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    /// `Conflict` when scores still reference the movie
    fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteMovieRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMovieRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    pub(crate) fn row_to_movie(row: &Row) -> Result<Movie, rusqlite::Error> {
        Ok(Movie {
            id: row.get("id")?,
            title: row.get("title")?,
            score: row.get("score")?,
            count: row.get("count")?,
            image: row.get("image")?,
        })
    }
}

impl MovieRepository for SqliteMovieRepository {
    fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        let conn = self.pool.get()?;

        let movie = conn
            .query_row(
                "SELECT id, title, score, count, image FROM movies WHERE id = ?1",
                params![id],
                Self::row_to_movie,
            )
            .optional()?;

        Ok(movie)
    }

    fn search_by_title(&self, title: &str, page: PageRequest) -> AppResult<Page<Movie>> {
        let limit = i64::from(page.size);
        let offset = i64::try_from(page.offset()).map_err(|_| {
            AppError::Validation(format!(
                "Page {} of size {} is out of range",
                page.page, page.size
            ))
        })?;

        let conn = self.pool.get()?;
        let pattern = format!("%{}%", escape_like(title.trim()));

        // unicode_upper is registered on every pooled connection
        let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM movies
             WHERE unicode_upper(title) LIKE unicode_upper(?1) ESCAPE '\\'",
            params![pattern],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(
            "SELECT id, title, score, count, image
             FROM movies
             WHERE unicode_upper(title) LIKE unicode_upper(?1) ESCAPE '\\'
             ORDER BY id
             LIMIT ?2 OFFSET ?3",
        )?;

        let movies: Vec<Movie> = stmt
            .query_map(params![pattern, limit, offset], Self::row_to_movie)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(movies, page, total as u64))
    }

    fn insert(&self, movie: &MovieDetails) -> AppResult<Movie> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO movies (title, score, count, image) VALUES (?1, 0, 0, ?2)",
            params![movie.title, movie.image],
        )?;

        Ok(Movie {
            id: conn.last_insert_rowid(),
            title: movie.title.clone(),
            score: 0.0,
            count: 0,
            image: movie.image.clone(),
        })
    }

    fn save(&self, movie: &Movie) -> AppResult<Movie> {
        let conn = self.pool.get()?;

        let changed = conn.execute(
            "UPDATE movies SET title = ?1, score = ?2, count = ?3, image = ?4 WHERE id = ?5",
            params![movie.title, movie.score, movie.count, movie.image, movie.id],
        )?;

        if changed == 0 {
            return Err(AppError::not_found(format!("Movie {}", movie.id)));
        }

        Ok(movie.clone())
    }

    fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM movies WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;

        Ok(exists)
    }

    fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        match conn.execute("DELETE FROM movies WHERE id = ?1", params![id]) {
            Ok(0) => Err(AppError::not_found(format!("Movie {}", id))),
            Ok(_) => Ok(()),
            Err(e) if is_foreign_key_violation(&e) => Err(AppError::Conflict(format!(
                "Movie {} is still referenced by scores",
                id
            ))),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}
