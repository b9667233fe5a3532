use axum::extract::State;
use caltrax_core::domain::profile::{entities::NutritionGoals, ports::ProfileService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    profile::validators::BiometricValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GoalsResponse {
    pub data: NutritionGoals,
}

#[utoipa::path(
    post,
    path = "/goals",
    tag = "profile",
    summary = "Preview goals",
    description = "Computes calorie and macro targets for a biometric form without saving it.",
    responses(
        (status = 200, body = GoalsResponse),
        (status = 400, description = "A required field is missing or out of range")
    ),
    request_body = BiometricValidator
)]
pub async fn preview_goals(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<BiometricValidator>,
) -> Result<Response<GoalsResponse>, ApiError> {
    let goals = state
        .service
        .preview_goals(payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GoalsResponse { data: goals }))
}
