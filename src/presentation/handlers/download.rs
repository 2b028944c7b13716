use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::application::ports::{
    ChartRenderer, FileLoader, LlmClient, ReportAssembler, SearchProvider,
};
use crate::presentation::state::AppState;

/// GET /api/download/{filename}: serves a previously generated artifact as
/// an attachment. Filenames containing path separators are rejected so the
/// handler can never read outside the artifact directory.
#[tracing::instrument(skip(state))]
pub async fn download_handler<F, S, L, C, A>(
    State(state): State<AppState<F, S, L, C, A>>,
    Path(filename): Path<String>,
) -> Response
where
    F: FileLoader,
    S: SearchProvider,
    L: LlmClient,
    C: ChartRenderer,
    A: ReportAssembler,
{
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return not_found();
    }

    let path = state.settings.artifact_dir.join(&filename);
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"report_{filename}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, filename = %filename, "Artifact not found");
            not_found()
        }
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "File not found" })),
    )
        .into_response()
}
