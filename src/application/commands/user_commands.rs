// src/application/commands/user_commands.rs
//
// User Command Handlers

use crate::application::{
    dto::*,
    error_handling::ToErrorResponse,
    state::AppState,
};
use crate::domain::user::entity::ROLE_ADMIN;
use crate::security::RequestContext;

use super::CommandResult;

/// The caller's own profile
pub fn get_me(state: &AppState, ctx: &RequestContext) -> CommandResult<UserDto> {
    let user = state.user_service.authenticated(ctx).to_error_response()?;
    Ok(user.into())
}

/// Directory entry for a username (admin only)
pub fn get_user_details(
    state: &AppState,
    ctx: &RequestContext,
    username: &str,
) -> CommandResult<UserDetailsDto> {
    state.user_service.require_role(ctx, ROLE_ADMIN).to_error_response()?;

    let details = state
        .user_service
        .load_user_by_username(username)
        .to_error_response()?;

    Ok(details.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::test_support::seeded_state;

    #[test]
    fn test_get_me() {
        let state = seeded_state();
        let me = get_me(&state, &RequestContext::for_username("maria@gmail.com")).unwrap();

        assert_eq!(me.username, "maria@gmail.com");
        assert_eq!(me.roles, vec!["ROLE_CLIENT", "ROLE_ADMIN"]);
    }

    #[test]
    fn test_get_me_unknown_is_401() {
        let state = seeded_state();
        let err = get_me(&state, &RequestContext::for_username("ghost@gmail.com")).unwrap_err();
        assert_eq!(err.status, 401);
    }

    #[test]
    fn test_user_details() {
        let state = seeded_state();
        let admin = RequestContext::for_username("maria@gmail.com");

        let details = get_user_details(&state, &admin, "alex@gmail.com").unwrap();
        assert_eq!(details.authorities, vec!["ROLE_CLIENT"]);

        let err = get_user_details(&state, &admin, "notvalid@gmail.com").unwrap_err();
        assert_eq!(err.status, 404);
    }

    #[test]
    fn test_user_details_requires_admin() {
        let state = seeded_state();
        let client = RequestContext::for_username("alex@gmail.com");

        let err = get_user_details(&state, &client, "maria@gmail.com").unwrap_err();
        assert_eq!(err.status, 403);
    }
}
