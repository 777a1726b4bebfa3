// src/services/movie_service.rs
//
// Movie catalog: CRUD and paginated title search

use std::sync::Arc;

use crate::domain::{validate_movie_details, Movie, MovieDetails, Page, PageRequest};
use crate::error::{AppError, AppResult};
use crate::repositories::MovieRepository;

pub struct MovieService {
    movie_repo: Arc<dyn MovieRepository>,
}

impl MovieService {
    pub fn new(movie_repo: Arc<dyn MovieRepository>) -> Self {
        Self { movie_repo }
    }

    pub fn find_all(&self, title: &str, page: PageRequest) -> AppResult<Page<Movie>> {
        self.movie_repo.search_by_title(title, page)
    }

    pub fn find_by_id(&self, id: i64) -> AppResult<Movie> {
        self.movie_repo
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found(format!("Movie {}", id)))
    }

    /// New movies always start with count = 0 and score = 0
    pub fn insert(&self, details: MovieDetails) -> AppResult<Movie> {
        validate_movie_details(&details)?;

        let movie = self.movie_repo.insert(&details)?;
        log::info!("Movie {} created: '{}'", movie.id, movie.title);

        Ok(movie)
    }

    /// Overwrites title and image; id and aggregates are preserved
    pub fn update(&self, id: i64, details: MovieDetails) -> AppResult<Movie> {
        validate_movie_details(&details)?;

        let mut movie = self.find_by_id(id)?;
        movie.update_details(details);

        let movie = self.movie_repo.save(&movie)?;
        log::info!("Movie {} updated", movie.id);

        Ok(movie)
    }

    /// `NotFound` for an unknown id, `Conflict` while scores reference it
    pub fn delete(&self, id: i64) -> AppResult<()> {
        if !self.movie_repo.exists_by_id(id)? {
            return Err(AppError::not_found(format!("Movie {}", id)));
        }

        match self.movie_repo.delete_by_id(id) {
            Ok(()) => {
                log::info!("Movie {} deleted", id);
                Ok(())
            }
            Err(AppError::Conflict(reason)) => {
                log::warn!("Refused to delete movie {}: {}", id, reason);
                Err(AppError::Conflict(format!("Referential integrity failure: {}", reason)))
            }
            Err(e) => Err(e),
        }
    }
}
