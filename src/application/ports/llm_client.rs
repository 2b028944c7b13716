use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Run a single bounded text-generation call and return the raw
    /// generated text.
    async fn generate(&self, prompt: &str) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("model credential not configured")]
    MissingCredential,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
