use async_trait::async_trait;

/// Rows of cells extracted from a document, in page order.
pub type Table = Vec<Vec<String>>;

#[async_trait]
pub trait FileLoader: Send + Sync {
    /// Extract concatenated text across all pages. Pages with no
    /// extractable text contribute nothing.
    async fn extract_text(&self, data: &[u8]) -> Result<String, FileLoaderError>;

    /// Extract all tables across all pages, in order.
    async fn extract_tables(&self, data: &[u8]) -> Result<Vec<Table>, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("extraction timed out")]
    Timeout,
}
