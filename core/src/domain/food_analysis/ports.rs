use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, food_analysis::value_objects::AnalyzeFoodImageInput,
    ledger::entities::FoodEntry,
};

/// Client for a vision-capable model answering with JSON.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync + 'static {
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait FoodAnalysisService: Send + Sync {
    /// Recognizes the food in an image and records it in the user's ledger.
    fn analyze_food_image(
        &self,
        user_id: String,
        input: AnalyzeFoodImageInput,
    ) -> impl Future<Output = Result<FoodEntry, CoreError>> + Send;
}
