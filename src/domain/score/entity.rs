use serde::{Deserialize, Serialize};

/// One user's rating of one movie.
///
/// Keyed by `(movie_id, user_id)`: submitting again replaces `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub movie_id: i64,
    pub user_id: i64,
    pub value: f64,
}

impl Score {
    pub fn new(movie_id: i64, user_id: i64, value: f64) -> Self {
        Self {
            movie_id,
            user_id,
            value,
        }
    }
}
