use super::handlers::{
    get_profile::{__path_get_profile, get_profile},
    preview_goals::{__path_preview_goals, preview_goals},
    update_profile::{__path_update_profile, update_profile},
};
use crate::application::{auth::auth, http::server::app_state::AppState};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_profile, update_profile, preview_goals))]
pub struct ProfileApiDoc;

pub fn profile_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/profile", state.args.server.root_path),
            get(get_profile).put(update_profile),
        )
        .route(
            &format!("{}/profile/goals", state.args.server.root_path),
            post(preview_goals),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
