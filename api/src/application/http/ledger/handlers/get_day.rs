use axum::{
    Extension,
    extract::{Path, State},
};
use caltrax_core::domain::ledger::{entities::DayBucket, ports::LedgerService};
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
pub struct DayResponse {
    pub data: DayBucket,
}

#[utoipa::path(
    get,
    path = "/days/{date}",
    tag = "ledger",
    summary = "Get day",
    description = "Returns the entries logged on a day and their totals. Days without entries are returned empty.",
    responses(
        (status = 200, body = DayResponse)
    ),
    params(
        ("date" = String, Path, description = "Day as YYYY-MM-DD"),
    ),
)]
pub async fn get_day(
    Path(date): Path<String>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Response<DayResponse>, ApiError> {
    let date = parse_date(&date)?;

    let day = state
        .service
        .get_day(identity.user_id, date)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DayResponse { data: day }))
}
