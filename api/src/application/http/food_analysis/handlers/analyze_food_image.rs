use axum::{
    Extension,
    extract::{Multipart, State},
};
use caltrax_core::domain::food_analysis::{
    ports::FoodAnalysisService, value_objects::AnalyzeFoodImageInput,
};
use chrono::NaiveDate;

use crate::application::{
    auth::Identity,
    http::{
        food_analysis::validators::AnalyzeFoodImageForm,
        ledger::{handlers::add_entry::EntryResponse, validators::parse_date},
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[utoipa::path(
    post,
    path = "/image",
    tag = "food-analysis",
    summary = "Analyze food from image",
    description = "Recognizes the food in a photo and logs it as a vision entry. Without `date` the entry lands on the caller's current day, computed from `utc_offset_minutes` (UTC when omitted). Requires an active subscription when billing is enforced.",
    responses(
        (status = 201, body = EntryResponse),
        (status = 402, description = "No active subscription"),
        (status = 502, description = "Food recognition is unavailable")
    ),
    request_body(content = AnalyzeFoodImageForm, content_type = "multipart/form-data"),
)]
pub async fn analyze_food_image(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    mut multipart: Multipart,
) -> Result<Response<EntryResponse>, ApiError> {
    let mut image: Option<(Vec<u8>, String)> = None;
    let mut date: Option<NaiveDate> = None;
    let mut utc_offset_minutes: Option<i32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "date" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read date: {}", e)))?;
                date = Some(parse_date(value.trim())?);
            }
            "utc_offset_minutes" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read utc offset: {}", e))
                })?;
                let minutes = value.trim().parse::<i32>().map_err(|_| {
                    ApiError::BadRequest(format!("Invalid utc offset: {}", value.trim()))
                })?;
                utc_offset_minutes = Some(minutes);
            }
            "image" => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(ApiError::BadRequest(format!(
                        "Image too large. Max size is {} bytes",
                        MAX_IMAGE_SIZE
                    )));
                }

                image = Some((data.to_vec(), mime_type));
            }
            _ => {}
        }
    }

    let (image_data, mime_type) =
        image.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let entry = state
        .service
        .analyze_food_image(
            identity.user_id,
            AnalyzeFoodImageInput {
                image_data,
                mime_type,
                date,
                utc_offset_minutes,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(EntryResponse { data: entry }))
}
