use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart form accepted by the image analysis endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeFoodImageForm {
    /// JPEG, PNG, WebP or HEIC photo of the meal.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,

    /// Day to log the entry on, YYYY-MM-DD. Defaults to the caller's today.
    pub date: Option<String>,

    /// Caller's offset from UTC in minutes (e.g. 120 for UTC+2), used when `date` is absent.
    pub utc_offset_minutes: Option<i32>,
}
