use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct AnalyzeFoodImageInput {
    pub image_data: Vec<u8>,
    pub mime_type: String,
    /// Day the entry is recorded on; today in the caller's zone when absent.
    pub date: Option<NaiveDate>,
    /// Caller's offset from UTC, used to find "today". UTC when absent.
    pub utc_offset_minutes: Option<i32>,
}
