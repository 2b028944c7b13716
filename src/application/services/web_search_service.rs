use std::sync::Arc;

use crate::application::ports::SearchProvider;
use crate::domain::SearchResult;

/// Fallback policy around the search provider.
///
/// `search` never fails and never returns an empty sequence: any provider
/// error (missing credential included) is substituted with a single
/// sentinel result so downstream formatting always has at least one entry.
/// `search_news` substitutes an empty sequence instead; the asymmetry is
/// deliberate and matches the historical behavior.
pub struct WebSearchService<S>
where
    S: SearchProvider,
{
    provider: Arc<S>,
}

impl<S> WebSearchService<S>
where
    S: SearchProvider,
{
    pub fn new(provider: Arc<S>) -> Self {
        Self { provider }
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str, count: usize) -> Vec<SearchResult> {
        match self.provider.search(query, count).await {
            Ok(results) => {
                tracing::info!(result_count = results.len(), "Web search complete");
                results
            }
            Err(e) => {
                tracing::warn!(error = %e, "Web search failed, substituting fallback result");
                vec![SearchResult::fallback()]
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn search_news(&self, query: &str, count: usize) -> Vec<SearchResult> {
        match self.provider.search_news(query, count).await {
            Ok(results) => {
                tracing::info!(result_count = results.len(), "News search complete");
                results
            }
            Err(e) => {
                tracing::warn!(error = %e, "News search failed, substituting empty results");
                Vec::new()
            }
        }
    }
}
