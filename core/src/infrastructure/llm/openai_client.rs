use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    food_analysis::ports::LLMClient,
};

#[derive(Debug, Clone)]
pub struct OpenAIVisionClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Part {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchema,
}

#[derive(Debug, Serialize)]
struct JsonSchema {
    name: &'static str,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

impl OpenAIVisionClient {
    pub fn new(config: &LLMConfig) -> Self {
        Self {
            api_key: config.openai_api_key.clone(),
            model_name: config.openai_model.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn build_request(
        &self,
        prompt: String,
        image_data: &[u8],
        mime_type: &str,
        response_schema: serde_json::Value,
    ) -> ChatRequest {
        let data_uri = format!(
            "data:{};base64,{}",
            mime_type,
            general_purpose::STANDARD.encode(image_data)
        );

        ChatRequest {
            model: self.model_name.clone(),
            messages: vec![Message {
                role: "user",
                content: vec![
                    Part::Text { text: prompt },
                    Part::ImageUrl {
                        image_url: ImageUrl { url: data_uri },
                    },
                ],
            }],
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchema {
                    name: "food_recognition",
                    strict: true,
                    schema: response_schema,
                },
            },
        }
    }

    async fn call_openai_api(&self, request: ChatRequest) -> Result<String, CoreError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {}",
                status
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

impl LLMClient for OpenAIVisionClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        let request = self.build_request(prompt, &image_data, &mime_type, response_schema);
        self.call_openai_api(request).await
    }
}
