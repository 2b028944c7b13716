use axum::Json;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{
    ChartRenderer, FileLoader, LlmClient, ReportAssembler, SearchProvider,
};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::config::MAX_UPLOAD_BYTES;
use crate::presentation::handlers::{
    download_handler, generate_report_handler, health_handler, home_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<F, S, L, C, A>(state: AppState<F, S, L, C, A>) -> Router
where
    F: FileLoader + 'static,
    S: SearchProvider + 'static,
    L: LlmClient + 'static,
    C: ChartRenderer + 'static,
    A: ReportAssembler + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(home_handler))
        .route("/api/health", get(health_handler::<F, S, L, C, A>))
        .route(
            "/api/generate-report",
            post(generate_report_handler::<F, S, L, C, A>),
        )
        .route(
            "/api/download/{filename}",
            get(download_handler::<F, S, L, C, A>),
        )
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}
