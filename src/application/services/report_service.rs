use std::sync::Arc;

use crate::application::ports::{
    AssemblerError, ChartRenderer, FileLoader, LlmClient, ReportAssembler, SearchProvider,
};
use crate::application::services::{ReportSynthesizer, SynthesisError, WebSearchService};
use crate::domain::{ChartImage, ReportArtifact, ReportSchema};

/// Web results requested per report.
const SEARCH_RESULT_COUNT: usize = 5;

/// The request orchestrator: sequences extraction, search, synthesis, chart
/// rendering and assembly.
///
/// The fallback policy is an explicit table here: EXTRACT_DOCUMENT,
/// SEARCH_WEB and RENDER_CHARTS are best-effort (failures are logged and
/// substituted with an empty default), SYNTHESIZE_REPORT and ASSEMBLE_PDF
/// are required (failures propagate as [`PipelineError`]).
pub struct ReportService<F, S, L, C, A>
where
    F: FileLoader,
    S: SearchProvider,
    L: LlmClient,
    C: ChartRenderer,
    A: ReportAssembler,
{
    file_loader: Arc<F>,
    web_search: WebSearchService<S>,
    synthesizer: ReportSynthesizer<L, C>,
    chart_renderer: Arc<C>,
    assembler: Arc<A>,
}

/// Everything the caller needs from a completed pipeline run.
#[derive(Debug)]
pub struct GeneratedReport {
    pub report: ReportSchema,
    pub charts_count: usize,
    pub artifact: ReportArtifact,
    pub search_results_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to generate report: {0}")]
    Synthesis(#[from] SynthesisError),
    #[error("Failed to generate PDF: {0}")]
    Assembly(#[from] AssemblerError),
}

impl<F, S, L, C, A> ReportService<F, S, L, C, A>
where
    F: FileLoader,
    S: SearchProvider,
    L: LlmClient,
    C: ChartRenderer,
    A: ReportAssembler,
{
    pub fn new(
        file_loader: Arc<F>,
        search_provider: Arc<S>,
        llm_client: Arc<L>,
        chart_renderer: Arc<C>,
        assembler: Arc<A>,
    ) -> Self {
        Self {
            file_loader,
            web_search: WebSearchService::new(search_provider),
            synthesizer: ReportSynthesizer::new(llm_client, Arc::clone(&chart_renderer)),
            chart_renderer,
            assembler,
        }
    }

    #[tracing::instrument(skip_all, fields(topic = %topic, has_document = document.is_some()))]
    pub async fn generate(
        &self,
        topic: &str,
        document: Option<&[u8]>,
    ) -> Result<GeneratedReport, PipelineError> {
        // EXTRACT_DOCUMENT: best-effort.
        let document_text = match document {
            Some(data) => match self.file_loader.extract_text(data).await {
                Ok(text) => {
                    tracing::info!(chars = text.chars().count(), "Document processed");
                    text
                }
                Err(e) => {
                    tracing::error!(error = %e, "Document extraction failed, continuing without it");
                    String::new()
                }
            },
            None => String::new(),
        };

        // SEARCH_WEB: best-effort; the service substitutes internally.
        let search_results = self.web_search.search(topic, SEARCH_RESULT_COUNT).await;

        // SYNTHESIZE_REPORT: required.
        let report = self
            .synthesizer
            .synthesize(topic, &document_text, &search_results)
            .await?;

        // RENDER_CHARTS: best-effort.
        let charts: Vec<ChartImage> = match self.chart_renderer.render(&report.data_points).await {
            Ok(charts) => {
                tracing::info!(chart_count = charts.len(), "Charts generated");
                charts
            }
            Err(e) => {
                tracing::error!(error = %e, "Chart rendering failed, continuing without charts");
                Vec::new()
            }
        };

        // ASSEMBLE_PDF: required.
        let artifact = self.assembler.compose(&report, &charts).await?;
        tracing::info!(filename = %artifact.filename, "PDF generated");

        Ok(GeneratedReport {
            charts_count: charts.len(),
            search_results_count: search_results.len(),
            report,
            artifact,
        })
    }
}
