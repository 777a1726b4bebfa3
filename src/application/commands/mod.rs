// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between a transport and the services
// - Commands accept DTOs plus the caller's RequestContext, return DTOs
// - Commands enforce role requirements and convert errors
// - Commands NEVER contain business logic

pub mod movie_commands;
pub mod score_commands;
pub mod user_commands;

pub use movie_commands::*;
pub use score_commands::*;
pub use user_commands::*;

use crate::application::error_handling::ErrorResponse;

pub type CommandResult<T> = Result<T, ErrorResponse>;
