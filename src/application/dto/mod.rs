// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// PRINCIPLES:
// - DTOs are the client-facing, serializable shapes
// - Credential hashes never appear in a DTO
// - Derived fields (movie score/count) are output-only

use serde::{Deserialize, Serialize};

use crate::domain::{Movie, MovieDetails, Page, Score, User, UserDetails};

// ============================================================================
// MOVIE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: i64,
    pub title: String,
    pub score: f64,
    pub count: i32,
    pub image: String,
}

/// Body of an insert or update.
///
/// `score` and `count` are accepted so a full `MovieDto` can be posted back,
/// but they are ignored: aggregates only change through ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieInputDto {
    pub title: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
}

/// Query string of the movie listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieQueryDto {
    #[serde(default)]
    pub title: String,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

// ============================================================================
// SCORE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDto {
    pub movie_id: i64,
    pub score: f64,
}

// ============================================================================
// USER DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub roles: Vec<String>,
}

/// Directory view of a login: username and authorities, no credential hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetailsDto {
    pub username: String,
    pub authorities: Vec<String>,
}

// ============================================================================
// RESPONSE DTOs
// ============================================================================

/// Page envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDto<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
}

// ============================================================================
// CONVERSION HELPERS
// ============================================================================

impl From<Movie> for MovieDto {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            score: movie.score,
            count: movie.count,
            image: movie.image,
        }
    }
}

impl From<MovieInputDto> for MovieDetails {
    fn from(dto: MovieInputDto) -> Self {
        MovieDetails::new(dto.title.trim().to_string(), dto.image.trim().to_string())
    }
}

impl From<Score> for ScoreDto {
    fn from(score: Score) -> Self {
        Self {
            movie_id: score.movie_id,
            score: score.value,
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            roles: user.roles.into_iter().map(|r| r.authority).collect(),
        }
    }
}

impl From<UserDetails> for UserDetailsDto {
    fn from(details: UserDetails) -> Self {
        Self {
            authorities: details.authorities().into_iter().map(String::from).collect(),
            username: details.username,
        }
    }
}

impl<T, U> From<Page<T>> for PageDto<U>
where
    U: From<T>,
{
    fn from(page: Page<T>) -> Self {
        Self {
            number: page.request.page,
            size: page.request.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages(),
            number_of_elements: page.number_of_elements(),
            first: page.is_first(),
            last: page.is_last(),
            content: page.content.into_iter().map(U::from).collect(),
        }
    }
}
