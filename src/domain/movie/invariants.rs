use super::entity::{Movie, MovieDetails};
use crate::domain::{DomainError, DomainResult};

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 80;

/// Validates the catalog fields a caller is allowed to set
pub fn validate_movie_details(movie: &MovieDetails) -> DomainResult<()> {
    validate_title(&movie.title)?;
    validate_image(&movie.image)?;
    Ok(())
}

/// Validates all Movie invariants, including the derived aggregates
pub fn validate_movie(movie: &Movie) -> DomainResult<()> {
    validate_title(&movie.title)?;
    validate_image(&movie.image)?;
    validate_aggregates(movie.score, movie.count)?;
    Ok(())
}

/// Title cannot be blank and must be 5 to 80 characters long
fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie title cannot be empty".to_string(),
        ));
    }

    let len = title.chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&len) {
        return Err(DomainError::InvariantViolation(format!(
            "Movie title must have between {} and {} characters, got {}",
            TITLE_MIN_CHARS, TITLE_MAX_CHARS, len
        )));
    }
    Ok(())
}

/// Poster must be an absolute http(s) URL
fn validate_image(image: &str) -> DomainResult<()> {
    let rest = image
        .strip_prefix("https://")
        .or_else(|| image.strip_prefix("http://"));

    match rest {
        Some(host_and_path) if !host_and_path.is_empty() && !image.contains(char::is_whitespace) => {
            Ok(())
        }
        _ => Err(DomainError::InvariantViolation(format!(
            "Movie image must be a valid URL: '{}'",
            image
        ))),
    }
}

/// score is never negative and is zero for an unrated movie
fn validate_aggregates(score: f64, count: i32) -> DomainResult<()> {
    if count < 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Rating count cannot be negative: {}",
            count
        )));
    }
    if !score.is_finite() || score < 0.0 {
        return Err(DomainError::InvariantViolation(format!(
            "Movie score must be a non-negative number: {}",
            score
        )));
    }
    if count == 0 && score != 0.0 {
        return Err(DomainError::InvariantViolation(
            "Unrated movie must have a zero score".to_string(),
        ));
    }
    Ok(())
}
