use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde_json::json;

use crate::application::ports::{
    ChartRenderer, FileLoader, LlmClient, ReportAssembler, SearchProvider,
};
use crate::presentation::state::AppState;

fn credential_status(present: bool) -> &'static str {
    if present { "✅" } else { "❌" }
}

pub async fn health_handler<F, S, L, C, A>(
    State(state): State<AppState<F, S, L, C, A>>,
) -> impl IntoResponse
where
    F: FileLoader,
    S: SearchProvider,
    L: LlmClient,
    C: ChartRenderer,
    A: ReportAssembler,
{
    Json(json!({
        "status": "healthy",
        "message": "Report Generator API is running",
        "services": {
            "huggingface": credential_status(state.settings.huggingface_api_token.is_some()),
            "serpapi": credential_status(state.settings.serpapi_api_key.is_some()),
        },
    }))
}
