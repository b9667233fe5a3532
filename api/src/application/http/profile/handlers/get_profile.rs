use axum::{Extension, extract::State};
use caltrax_core::domain::profile::{entities::Profile, ports::ProfileService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::Identity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProfileResponse {
    pub data: Profile,
}

#[utoipa::path(
    get,
    path = "",
    tag = "profile",
    summary = "Get profile",
    description = "Returns the caller's biometric profile with its calorie and macro targets.",
    responses(
        (status = 200, body = ProfileResponse),
        (status = 404, description = "No profile saved yet")
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Response<ProfileResponse>, ApiError> {
    let profile = state
        .service
        .get_profile(identity.user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Response::OK(ProfileResponse { data: profile }))
}
