use axum::{
    Extension,
    extract::{Path, State},
};
use caltrax_core::domain::ledger::ports::LedgerService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

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
pub struct DeleteEntryResponse {
    /// `false` when there was nothing to delete.
    pub deleted: bool,
}

#[utoipa::path(
    delete,
    path = "/days/{date}/entries/{entry_id}",
    tag = "ledger",
    summary = "Delete entry",
    description = "Removes an entry from a day. Deleting an unknown entry is not an error.",
    responses(
        (status = 200, body = DeleteEntryResponse)
    ),
    params(
        ("date" = String, Path, description = "Day as YYYY-MM-DD"),
        ("entry_id" = Uuid, Path, description = "Entry ID"),
    ),
)]
pub async fn delete_entry(
    Path((date, entry_id)): Path<(String, Uuid)>,
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Response<DeleteEntryResponse>, ApiError> {
    let date = parse_date(&date)?;

    let deleted = state
        .service
        .delete_entry(identity.user_id, date, entry_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteEntryResponse { deleted }))
}
