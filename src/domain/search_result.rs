use serde::Serialize;

/// A normalized web search hit. Immutable once created; consumed read-only
/// by the report synthesizer and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl SearchResult {
    /// The sentinel result substituted when the search provider is
    /// unavailable, so downstream formatting always has something to show.
    pub fn fallback() -> Self {
        Self {
            title: "Sample Result 1".to_string(),
            description: "This is a fallback result for demo purposes.".to_string(),
            url: "https://example.com".to_string(),
            source: "example.com".to_string(),
            date: None,
        }
    }
}
