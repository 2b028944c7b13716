use async_trait::async_trait;

use crate::domain::{ChartImage, DataPoint};

#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Render charts from the given data points. Fewer than 2 points
    /// yields an empty sequence; each chart-type attempt is independently
    /// best-effort, so the result may hold fewer charts than attempted.
    async fn render(&self, data_points: &[DataPoint])
    -> Result<Vec<ChartImage>, ChartRendererError>;

    /// Render a generic placeholder line plot, returned as a
    /// `data:image/png;base64,` URI. Used by the synthesizer fallback.
    async fn render_placeholder(&self, title: &str) -> Result<String, ChartRendererError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ChartRendererError {
    #[error("rendering failed: {0}")]
    RenderFailed(String),
    #[error("image encoding failed: {0}")]
    EncodingFailed(String),
}
