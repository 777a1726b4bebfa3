// src/application/commands/score_commands.rs
//
// Score Command Handlers

use crate::application::{
    dto::*,
    error_handling::ToErrorResponse,
    state::AppState,
};
use crate::domain::user::entity::{ROLE_ADMIN, ROLE_CLIENT};
use crate::security::RequestContext;

use super::CommandResult;

/// Rate a movie as the caller; returns the movie with its new aggregate
pub fn save_score(state: &AppState, ctx: &RequestContext, dto: ScoreDto) -> CommandResult<MovieDto> {
    state
        .user_service
        .require_any_role(ctx, &[ROLE_ADMIN, ROLE_CLIENT])
        .to_error_response()?;

    let movie = state
        .score_service
        .save_score(ctx, dto.movie_id, dto.score)
        .to_error_response()?;

    Ok(movie.into())
}

/// The caller's own rating of a movie
pub fn get_own_score(
    state: &AppState,
    ctx: &RequestContext,
    movie_id: i64,
) -> CommandResult<Option<ScoreDto>> {
    let score = state
        .score_service
        .find_user_score(ctx, movie_id)
        .to_error_response()?;

    Ok(score.map(ScoreDto::from))
}
