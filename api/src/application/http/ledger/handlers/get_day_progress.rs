use axum::{
    Extension,
    extract::{Path, State},
};
use caltrax_core::domain::ledger::{ports::LedgerService, value_objects::DayProgress};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::Identity,
    http::{
        ledger::validators::parse_date,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DayProgressResponse {
    pub data: DayProgress,
}

#[utoipa::path(
    get,
    path = "/days/{date}/progress",
    tag = "ledger",
    summary = "Get day progress",
    description = "Returns a day together with the progress towards the caller's calorie and macro targets. Progress is null until a profile is saved.",
    responses(
        (status = 200, body = DayProgressResponse)
    ),
    params(
        ("date" = String, Path, description = "Day as YYYY-MM-DD"),
    ),
)]
pub async fn get_day_progress(
    Path(date): Path<String>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Response<DayProgressResponse>, ApiError> {
    let date = parse_date(&date)?;

    let progress = state
        .service
        .get_day_progress(identity.user_id, date)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DayProgressResponse { data: progress }))
}
