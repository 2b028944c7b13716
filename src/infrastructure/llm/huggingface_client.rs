use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};

const DEFAULT_MODEL: &str = "bigscience/bloomz-560m";
const INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_NEW_TOKENS: usize = 500;
const TEMPERATURE: f32 = 0.3;

/// Text generation via the Hugging Face hosted inference API.
pub struct HuggingFaceClient {
    client: Client,
    api_token: Option<String>,
    model: String,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_new_tokens: usize,
    temperature: f32,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

impl HuggingFaceClient {
    pub fn new(api_token: Option<String>) -> Self {
        Self::with_model(api_token, DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_token: Option<String>, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_token,
            model,
        }
    }
}

#[async_trait]
impl LlmClient for HuggingFaceClient {
    #[tracing::instrument(skip_all, fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, LlmClientError> {
        let api_token = self
            .api_token
            .as_deref()
            .ok_or(LlmClientError::MissingCredential)?;

        let request = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(format!("{INFERENCE_BASE_URL}/{}", self.model))
            .bearer_auth(api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let generations: Vec<GeneratedText> = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty generations".to_string()))
    }
}
