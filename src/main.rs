use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use reportal::application::services::ReportService;
use reportal::infrastructure::charts::PlottersRenderer;
use reportal::infrastructure::llm::HuggingFaceClient;
use reportal::infrastructure::observability::{TracingConfig, init_tracing};
use reportal::infrastructure::report::PdfComposer;
use reportal::infrastructure::search::SerpApiClient;
use reportal::infrastructure::text_processing::PdfAdapter;
use reportal::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials are read from .env in local development; absence of the
    // file is not an error.
    let _ = dotenvy::dotenv();

    let settings = Settings::from_env();

    init_tracing(TracingConfig::default(), settings.port);

    if settings.huggingface_api_token.is_none() {
        tracing::warn!("HUGGINGFACE_API_TOKEN not set, report synthesis will use fallbacks");
    }
    if settings.serpapi_api_key.is_none() {
        tracing::warn!("SERPAPI_API_KEY not set, web search will use fallbacks");
    }

    let file_loader = Arc::new(PdfAdapter::new());
    let search_provider = Arc::new(SerpApiClient::new(settings.serpapi_api_key.clone()));
    let llm_client = Arc::new(HuggingFaceClient::new(
        settings.huggingface_api_token.clone(),
    ));
    let chart_renderer = Arc::new(PlottersRenderer::new());
    let assembler = Arc::new(PdfComposer::new(settings.artifact_dir.clone()));

    let report_service = Arc::new(ReportService::new(
        file_loader,
        search_provider,
        llm_client,
        chart_renderer,
        assembler,
    ));

    let state = AppState {
        report_service,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
