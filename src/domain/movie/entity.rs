use serde::{Deserialize, Serialize};

use crate::domain::score::ScoreAggregate;

/// A catalog entry that users can rate.
///
/// `score` and `count` are derived from the movie's score rows and are only
/// changed through [`Movie::apply_aggregate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Storage identifier
    pub id: i64,

    pub title: String,

    /// Running average of all ratings (0 when unrated)
    pub score: f64,

    /// Number of ratings
    pub count: i32,

    /// Poster URL
    pub image: String,
}

/// The catalog fields a caller may set, for inserts and updates.
///
/// Aggregates are absent on purpose: a new movie always starts unrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetails {
    pub title: String,
    pub image: String,
}

impl MovieDetails {
    pub fn new(title: String, image: String) -> Self {
        Self { title, image }
    }
}

impl Movie {
    /// Overwrite the catalog fields, leaving identity and aggregates alone.
    pub fn update_details(&mut self, details: MovieDetails) {
        self.title = details.title;
        self.image = details.image;
    }

    pub fn apply_aggregate(&mut self, aggregate: ScoreAggregate) {
        self.score = aggregate.mean;
        self.count = aggregate.count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn witcher() -> Movie {
        Movie {
            id: 1,
            title: "The Witcher".to_string(),
            score: 4.5,
            count: 2,
            image: "https://www.themoviedb.org/t/p/w533_and_h300_bestv2/jBJWaqoSCiARWtfV0GlqHrcdidd.jpg".to_string(),
        }
    }

    #[test]
    fn test_update_details_keeps_aggregates() {
        let mut movie = witcher();
        movie.update_details(MovieDetails::new(
            "Blade Runner".to_string(),
            "https://img/br.jpg".to_string(),
        ));

        assert_eq!(movie.id, 1);
        assert_eq!(movie.title, "Blade Runner");
        assert_eq!(movie.image, "https://img/br.jpg");
        assert_eq!(movie.count, 2);
        assert!((movie.score - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_aggregate() {
        let mut movie = witcher();
        movie.apply_aggregate(ScoreAggregate::from_values(&[2.0, 5.0]));

        assert_eq!(movie.count, 2);
        assert!((movie.score - 3.5).abs() < f64::EPSILON);
    }
}
