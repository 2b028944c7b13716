use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{SearchProvider, SearchProviderError};
use crate::domain::SearchResult;

const SERPAPI_URL: &str = "https://serpapi.com/search";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Google search via SerpAPI.
pub struct SerpApiClient {
    client: Client,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    answer_box: Option<AnswerBox>,
    #[serde(default)]
    news_results: Vec<NewsResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    displayed_link: String,
}

#[derive(Deserialize)]
struct AnswerBox {
    title: Option<String>,
    answer: Option<String>,
    snippet: Option<String>,
    #[serde(default)]
    link: String,
}

#[derive(Deserialize)]
struct NewsResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    source: String,
    date: Option<String>,
}

impl SerpApiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key,
        }
    }

    async fn query(
        &self,
        query: &str,
        count: usize,
        news: bool,
    ) -> Result<SerpApiResponse, SearchProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SearchProviderError::MissingCredential)?;

        let count = count.to_string();
        let mut params = vec![
            ("q", query),
            ("api_key", api_key),
            ("num", count.as_str()),
            ("engine", "google"),
        ];
        if news {
            params.push(("tbm", "nws"));
        }

        let response = self
            .client
            .get(SERPAPI_URL)
            .query(&params)
            .send()
            .await
            .map_err(|e| SearchProviderError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchProviderError::ApiRequestFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SearchProviderError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    #[tracing::instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<SearchResult>, SearchProviderError> {
        let response = self.query(query, count, false).await?;

        let mut results: Vec<SearchResult> = response
            .organic_results
            .into_iter()
            .map(|r| SearchResult {
                title: r.title,
                description: r.snippet,
                url: r.link,
                source: r.displayed_link,
                date: None,
            })
            .collect();

        if let Some(answer_box) = response.answer_box {
            results.insert(
                0,
                SearchResult {
                    title: answer_box
                        .title
                        .unwrap_or_else(|| "Featured Answer".to_string()),
                    description: answer_box
                        .answer
                        .or(answer_box.snippet)
                        .unwrap_or_default(),
                    url: answer_box.link,
                    source: "Featured Snippet".to_string(),
                    date: None,
                },
            );
        }

        Ok(results)
    }

    #[tracing::instrument(skip(self))]
    async fn search_news(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<SearchResult>, SearchProviderError> {
        let response = self.query(query, count, true).await?;

        Ok(response
            .news_results
            .into_iter()
            .map(|r| SearchResult {
                title: r.title,
                description: r.snippet,
                url: r.link,
                source: r.source,
                date: r.date,
            })
            .collect())
    }
}
