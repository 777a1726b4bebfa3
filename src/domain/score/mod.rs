pub mod aggregate;
pub mod entity;
pub mod invariants;

pub use aggregate::ScoreAggregate;
pub use entity::Score;
pub use invariants::{validate_score, MAX_SCORE, MIN_SCORE};
