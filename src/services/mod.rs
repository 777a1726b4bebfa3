// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod movie_service;
pub mod score_service;
pub mod user_service;


pub use movie_service::MovieService;
pub use score_service::ScoreService;
pub use user_service::UserService;
