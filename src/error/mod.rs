// src/error/mod.rs
//
// Application-wide error taxonomy

pub mod types;

pub use types::{AppError, AppResult};
