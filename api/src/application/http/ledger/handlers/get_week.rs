use axum::{
    Extension,
    extract::{Path, State},
};
use caltrax_core::domain::ledger::{entities::WeekBucket, ports::LedgerService};
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
pub struct WeekResponse {
    pub data: WeekBucket,
}

#[utoipa::path(
    get,
    path = "/weeks/{date}",
    tag = "ledger",
    summary = "Get week",
    description = "Returns the Monday-to-Sunday week containing the given day, with weekly totals.",
    responses(
        (status = 200, body = WeekResponse)
    ),
    params(
        ("date" = String, Path, description = "Any day of the week as YYYY-MM-DD"),
    ),
)]
pub async fn get_week(
    Path(date): Path<String>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Response<WeekResponse>, ApiError> {
    let date = parse_date(&date)?;

    let week = state
        .service
        .get_week(identity.user_id, date)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(WeekResponse { data: week }))
}
