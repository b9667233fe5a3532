use axum::{Extension, extract::State};
use caltrax_core::domain::profile::ports::ProfileService;

use crate::application::{
    auth::Identity,
    http::{
        profile::{handlers::get_profile::ProfileResponse, validators::BiometricValidator},
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    put,
    path = "",
    tag = "profile",
    summary = "Save profile",
    description = "Saves the biometric form and recomputes the daily calorie and macro targets.",
    responses(
        (status = 200, body = ProfileResponse),
        (status = 400, description = "A required field is missing or out of range")
    ),
    request_body = BiometricValidator
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ValidateJson(payload): ValidateJson<BiometricValidator>,
) -> Result<Response<ProfileResponse>, ApiError> {
    let profile = state
        .service
        .save_profile(identity.user_id, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ProfileResponse { data: profile }))
}
