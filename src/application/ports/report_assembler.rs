use async_trait::async_trait;

use crate::domain::{ChartImage, ReportArtifact, ReportSchema};

#[async_trait]
pub trait ReportAssembler: Send + Sync {
    /// Lay out the report and charts into a paginated PDF and write it to
    /// the artifact directory. Always produces a complete document; absent
    /// optional sections are reduced or omitted, never left blank.
    async fn compose(
        &self,
        report: &ReportSchema,
        charts: &[ChartImage],
    ) -> Result<ReportArtifact, AssemblerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AssemblerError {
    #[error("font discovery failed: {0}")]
    FontUnavailable(String),
    #[error("render failed: {0}")]
    RenderFailed(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
