use chrono::Utc;
use tracing::{error, info, instrument};

use crate::domain::{
    billing::ports::{BillingPolicy, SubscriptionRepository},
    common::{entities::app_errors::CoreError, policies::ensure_policy, services::Service},
    food_analysis::{
        helpers::{entry_date, recognition_to_entry},
        ports::{FoodAnalysisService, LLMClient},
        schema::{RECOGNITION_PROMPT, get_food_recognition_schema},
        value_objects::AnalyzeFoodImageInput,
    },
    ledger::{entities::FoodEntry, ports::LedgerService},
    storage::ports::{KeyValueStore, RemoteStore},
};

impl<KV, RS, LLM, SR> FoodAnalysisService for Service<KV, RS, LLM, SR>
where
    KV: KeyValueStore,
    RS: RemoteStore,
    LLM: LLMClient,
    SR: SubscriptionRepository,
{
    #[instrument(skip(self, input), fields(mime_type = %input.mime_type, bytes = input.image_data.len()))]
    async fn analyze_food_image(
        &self,
        user_id: String,
        input: AnalyzeFoodImageInput,
    ) -> Result<FoodEntry, CoreError> {
        if input.image_data.is_empty() {
            return Err(CoreError::Invalid("image is empty".to_string()));
        }
        if !input.mime_type.starts_with("image/") {
            return Err(CoreError::Invalid(format!(
                "unsupported content type {}",
                input.mime_type
            )));
        }

        let date = entry_date(input.date, input.utc_offset_minutes, Utc::now())?;

        ensure_policy(
            self.can_use_paid_features(user_id.clone()).await,
            CoreError::PaymentRequired,
        )?;

        let raw = self
            .llm_client
            .generate_with_image(
                RECOGNITION_PROMPT.to_string(),
                input.image_data,
                input.mime_type,
                get_food_recognition_schema(),
            )
            .await?;

        let payload: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            error!("Failed to parse recognition response: {}", e);
            CoreError::ExternalServiceError("unreadable recognition response".to_string())
        })?;

        let new_entry = recognition_to_entry(&payload);
        info!(name = %new_entry.name, "food recognized");

        self.add_entry(user_id, date, new_entry).await
    }
}
