pub mod entity;
pub mod invariants;

pub use entity::{Movie, MovieDetails};
pub use invariants::{validate_movie, validate_movie_details};
