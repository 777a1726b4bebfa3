// src/application/commands/movie_commands.rs
//
// Movie Command Handlers
//
// Reads are public; insert/update/delete require ROLE_ADMIN.

use crate::application::{
    dto::*,
    error_handling::ToErrorResponse,
    state::AppState,
};
use crate::domain::user::entity::ROLE_ADMIN;
use crate::security::RequestContext;

use super::CommandResult;

/// List movies whose title contains the filter
pub fn list_movies(state: &AppState, query: MovieQueryDto) -> CommandResult<PageDto<MovieDto>> {
    let page = state.page_request(query.page, query.size);

    let movies = state
        .movie_service
        .find_all(&query.title, page)
        .to_error_response()?;

    Ok(movies.into())
}

/// Get a single movie by id
pub fn get_movie(state: &AppState, movie_id: i64) -> CommandResult<MovieDto> {
    let movie = state.movie_service.find_by_id(movie_id).to_error_response()?;
    Ok(movie.into())
}

/// Create a movie
pub fn create_movie(
    state: &AppState,
    ctx: &RequestContext,
    dto: MovieInputDto,
) -> CommandResult<MovieDto> {
    state.user_service.require_role(ctx, ROLE_ADMIN).to_error_response()?;

    let movie = state.movie_service.insert(dto.into()).to_error_response()?;
    Ok(movie.into())
}

/// Replace a movie's title and image
pub fn update_movie(
    state: &AppState,
    ctx: &RequestContext,
    movie_id: i64,
    dto: MovieInputDto,
) -> CommandResult<MovieDto> {
    state.user_service.require_role(ctx, ROLE_ADMIN).to_error_response()?;

    let movie = state
        .movie_service
        .update(movie_id, dto.into())
        .to_error_response()?;
    Ok(movie.into())
}

/// Delete a movie with no ratings
pub fn delete_movie(state: &AppState, ctx: &RequestContext, movie_id: i64) -> CommandResult<()> {
    state.user_service.require_role(ctx, ROLE_ADMIN).to_error_response()?;

    state.movie_service.delete(movie_id).to_error_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::test_support::seeded_state;
    use crate::application::error_handling::ErrorType;

    fn admin() -> RequestContext {
        RequestContext::for_username("maria@gmail.com")
    }

    fn client() -> RequestContext {
        RequestContext::for_username("alex@gmail.com")
    }

    fn input(title: &str) -> MovieInputDto {
        MovieInputDto {
            title: title.to_string(),
            image: "https://img.example/poster.jpg".to_string(),
            score: Some(4.9),
            count: Some(1000),
        }
    }

    #[test]
    fn test_list_uses_default_page_size() {
        let state = seeded_state();
        let page = list_movies(&state, MovieQueryDto::default()).unwrap();

        assert_eq!(page.size, 12);
        assert_eq!(page.total_elements, 6);
        assert!(page.first && page.last);
    }

    #[test]
    fn test_list_filters_and_caps_size() {
        let state = seeded_state();
        let page = list_movies(
            &state,
            MovieQueryDto {
                title: "witcher".to_string(),
                page: None,
                size: Some(10_000),
            },
        )
        .unwrap();

        assert_eq!(page.size, 100);
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].title, "The Witcher");
    }

    #[test]
    fn test_list_matches_accented_titles_in_any_case() {
        let state = seeded_state();
        let query = |title: &str| MovieQueryDto {
            title: title.to_string(),
            page: None,
            size: None,
        };

        let rings = list_movies(&state, query("DEZ ANÉIS")).unwrap();
        assert_eq!(rings.total_elements, 1);
        assert_eq!(rings.content[0].id, 5);

        let threat = list_movies(&state, query("ameaça")).unwrap();
        assert_eq!(threat.total_elements, 1);
        assert_eq!(threat.content[0].id, 3);
    }

    #[test]
    fn test_get_missing_movie_is_404() {
        let state = seeded_state();
        let err = get_movie(&state, 999).unwrap_err();
        assert_eq!(err.status, 404);
    }

    #[test]
    fn test_admin_creates_unrated_movie() {
        let state = seeded_state();
        let movie = create_movie(&state, &admin(), input("Duna: Parte Dois")).unwrap();

        assert_eq!(movie.count, 0);
        assert_eq!(movie.score, 0.0);
        assert_eq!(get_movie(&state, movie.id).unwrap(), movie);
    }

    #[test]
    fn test_client_cannot_create() {
        let state = seeded_state();
        let err = create_movie(&state, &client(), input("Duna: Parte Dois")).unwrap_err();
        assert_eq!(err.error_type, ErrorType::Forbidden);
    }

    #[test]
    fn test_anonymous_cannot_delete() {
        let state = seeded_state();
        let err = delete_movie(&state, &RequestContext::anonymous(), 1).unwrap_err();
        assert_eq!(err.status, 401);
    }

    #[test]
    fn test_invalid_input_is_422() {
        let state = seeded_state();
        let err = update_movie(&state, &admin(), 1, input("X")).unwrap_err();
        assert_eq!(err.status, 422);
    }

    #[test]
    fn test_update_and_delete() {
        let state = seeded_state();

        let updated = update_movie(&state, &admin(), 1, input("The Witcher: Blood Origin")).unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.title, "The Witcher: Blood Origin");
        assert_eq!(updated.count, 0);

        delete_movie(&state, &admin(), 1).unwrap();
        assert_eq!(delete_movie(&state, &admin(), 1).unwrap_err().status, 404);
    }
}
