use async_trait::async_trait;

use crate::domain::SearchResult;

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Web search, normalized to [`SearchResult`] records. A featured
    /// answer, when present, is inserted at position 0 with source
    /// "Featured Snippet".
    async fn search(&self, query: &str, count: usize)
    -> Result<Vec<SearchResult>, SearchProviderError>;

    /// News-scoped search; results carry a `date` field.
    async fn search_news(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<SearchResult>, SearchProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SearchProviderError {
    #[error("search credential not configured")]
    MissingCredential,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
