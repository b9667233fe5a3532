use axum::{
    Extension,
    extract::{Path, State},
};
use caltrax_core::domain::ledger::{entities::FoodEntry, ports::LedgerService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::Identity,
    http::{
        ledger::validators::{AddEntryValidator, parse_date},
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct EntryResponse {
    pub data: FoodEntry,
}

#[utoipa::path(
    post,
    path = "/days/{date}/entries",
    tag = "ledger",
    summary = "Add entry",
    description = "Logs a food entry on the given day.",
    responses(
        (status = 201, body = EntryResponse),
        (status = 503, description = "Local storage is unavailable")
    ),
    params(
        ("date" = String, Path, description = "Day as YYYY-MM-DD"),
    ),
    request_body = AddEntryValidator
)]
pub async fn add_entry(
    Path(date): Path<String>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ValidateJson(payload): ValidateJson<AddEntryValidator>,
) -> Result<Response<EntryResponse>, ApiError> {
    let date = parse_date(&date)?;

    let entry = state
        .service
        .add_entry(identity.user_id, date, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(EntryResponse { data: entry }))
}
