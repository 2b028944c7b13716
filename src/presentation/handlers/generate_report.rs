use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::application::ports::{
    ChartRenderer, FileLoader, LlmClient, ReportAssembler, SearchProvider,
};
use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::state::AppState;

/// POST /api/generate-report: multipart form with a required `topic` field
/// and an optional `document` PDF upload.
#[tracing::instrument(skip_all)]
pub async fn generate_report_handler<F, S, L, C, A>(
    State(state): State<AppState<F, S, L, C, A>>,
    mut multipart: Multipart,
) -> Response
where
    F: FileLoader,
    S: SearchProvider,
    L: LlmClient,
    C: ChartRenderer,
    A: ReportAssembler,
{
    let mut topic: Option<String> = None;
    let mut document: Option<Vec<u8>> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => match field.name().map(str::to_owned).as_deref() {
                Some("topic") => match field.text().await {
                    Ok(text) => topic = Some(text),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read topic field");
                        return error_response(StatusCode::BAD_REQUEST, "Topic is required");
                    }
                },
                Some("document") => match field.bytes().await {
                    Ok(bytes) if !bytes.is_empty() => document = Some(bytes.to_vec()),
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read document upload");
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            "Failed to read uploaded document",
                        );
                    }
                },
                _ => {}
            },
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed multipart body");
                return error_response(StatusCode::BAD_REQUEST, "Invalid multipart request");
            }
        }
    }

    let topic = match topic.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        Some(topic) => topic,
        None => return error_response(StatusCode::BAD_REQUEST, "Topic is required"),
    };

    tracing::info!(
        topic = %sanitize_for_log(&topic),
        document_bytes = document.as_ref().map(|d| d.len()).unwrap_or(0),
        "Report generation requested"
    );

    match state
        .report_service
        .generate(&topic, document.as_deref())
        .await
    {
        Ok(generated) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "report": generated.report,
                "charts_count": generated.charts_count,
                "pdf_url": generated.artifact.download_url(),
                "search_results_count": generated.search_results_count,
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Report pipeline failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}
