use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use reportal::application::ports::{
    AssemblerError, ChartRenderer, ChartRendererError, FileLoader, FileLoaderError, LlmClient,
    LlmClientError, ReportAssembler, SearchProvider, SearchProviderError, Table,
};
use reportal::application::services::ReportService;
use reportal::domain::{ChartImage, ChartKind, DataPoint, ReportArtifact, ReportSchema, SearchResult};
use reportal::presentation::{AppState, Settings, create_router};

const BOUNDARY: &str = "test-boundary";

struct MockFileLoader;

#[async_trait::async_trait]
impl FileLoader for MockFileLoader {
    async fn extract_text(&self, data: &[u8]) -> Result<String, FileLoaderError> {
        String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }

    async fn extract_tables(&self, _data: &[u8]) -> Result<Vec<Table>, FileLoaderError> {
        Ok(Vec::new())
    }
}

struct MockSearchProvider;

#[async_trait::async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(
        &self,
        _query: &str,
        _count: usize,
    ) -> Result<Vec<SearchResult>, SearchProviderError> {
        Ok(vec![
            SearchResult {
                title: "Result A".to_string(),
                description: "First result".to_string(),
                url: "https://a.example".to_string(),
                source: "a.example".to_string(),
                date: None,
            },
            SearchResult {
                title: "Result B".to_string(),
                description: "Second result".to_string(),
                url: "https://b.example".to_string(),
                source: "b.example".to_string(),
                date: None,
            },
        ])
    }

    async fn search_news(
        &self,
        _query: &str,
        _count: usize,
    ) -> Result<Vec<SearchResult>, SearchProviderError> {
        Ok(Vec::new())
    }
}

struct MockLlmClient;

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Ok(r#"{
            "executive_summary": "Solar adoption is accelerating.",
            "key_findings": ["Capacity doubled"],
            "charts": ["data:image/png;base64,AAAA"],
            "recommendations": ["Expand grid storage"]
        }"#
        .to_string())
    }
}

struct MockChartRenderer;

#[async_trait::async_trait]
impl ChartRenderer for MockChartRenderer {
    async fn render(
        &self,
        _data_points: &[DataPoint],
    ) -> Result<Vec<ChartImage>, ChartRendererError> {
        Ok(vec![ChartImage::new(ChartKind::Bar, "AAAA".to_string())])
    }

    async fn render_placeholder(&self, _title: &str) -> Result<String, ChartRendererError> {
        Ok("data:image/png;base64,AAAA".to_string())
    }
}

struct MockAssembler;

#[async_trait::async_trait]
impl ReportAssembler for MockAssembler {
    async fn compose(
        &self,
        _report: &ReportSchema,
        _charts: &[ChartImage],
    ) -> Result<ReportArtifact, AssemblerError> {
        Ok(ReportArtifact::new(
            "test-report.pdf".to_string(),
            PathBuf::from("/tmp/test-report.pdf"),
        ))
    }
}

fn test_settings(artifact_dir: PathBuf) -> Settings {
    Settings {
        port: 5000,
        huggingface_api_token: None,
        serpapi_api_key: None,
        artifact_dir,
    }
}

fn create_test_app(settings: Settings) -> axum::Router {
    let report_service = Arc::new(ReportService::new(
        Arc::new(MockFileLoader),
        Arc::new(MockSearchProvider),
        Arc::new(MockLlmClient),
        Arc::new(MockChartRenderer),
        Arc::new(MockAssembler),
    ));

    create_router(AppState {
        report_service,
        settings,
    })
}

fn multipart_body(fields: &[(&str, &str)]) -> (String, Body) {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\ncontent-disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        Body::from(body),
    )
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_running_server_when_health_check_then_reports_credential_status() {
    let app = create_test_app(test_settings(std::env::temp_dir()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["message"], "Report Generator API is running");
    assert_eq!(json["services"]["huggingface"], "❌");
    assert_eq!(json["services"]["serpapi"], "❌");
}

#[tokio::test]
async fn given_configured_credentials_when_health_check_then_marks_services_available() {
    let mut settings = test_settings(std::env::temp_dir());
    settings.huggingface_api_token = Some("hf_token".to_string());
    settings.serpapi_api_key = Some("serp_key".to_string());
    let app = create_test_app(settings);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = response_json(response).await;
    assert_eq!(json["services"]["huggingface"], "✅");
    assert_eq!(json["services"]["serpapi"], "✅");
}

#[tokio::test]
async fn given_valid_topic_when_generate_report_then_returns_full_payload() {
    let app = create_test_app(test_settings(std::env::temp_dir()));

    let (content_type, body) = multipart_body(&[("topic", "renewable energy")]);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate-report")
                .header(header::CONTENT_TYPE, content_type)
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(
        json["report"]["executive_summary"],
        "Solar adoption is accelerating."
    );
    assert_eq!(json["charts_count"], 1);
    assert_eq!(json["search_results_count"], 2);
    assert_eq!(json["pdf_url"], "/api/download/test-report.pdf");
}

#[tokio::test]
async fn given_missing_topic_when_generate_report_then_returns_bad_request() {
    let app = create_test_app(test_settings(std::env::temp_dir()));

    let (content_type, body) = multipart_body(&[("other", "value")]);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate-report")
                .header(header::CONTENT_TYPE, content_type)
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Topic is required");
}

#[tokio::test]
async fn given_whitespace_topic_when_generate_report_then_returns_bad_request() {
    let app = create_test_app(test_settings(std::env::temp_dir()));

    let (content_type, body) = multipart_body(&[("topic", "   ")]);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate-report")
                .header(header::CONTENT_TYPE, content_type)
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_existing_artifact_when_download_then_serves_attachment() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("abc.pdf"), b"%PDF-1.7 test").unwrap();
    let app = create_test_app(test_settings(dir.path().to_path_buf()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/download/abc.pdf")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("report_abc.pdf"));
}

#[tokio::test]
async fn given_unknown_artifact_when_download_then_returns_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(test_settings(dir.path().to_path_buf()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/download/missing.pdf")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert_eq!(json["error"], "File not found");
}

#[tokio::test]
async fn given_traversal_filename_when_download_then_returns_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(test_settings(dir.path().to_path_buf()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/download/..%2F..%2Fetc%2Fpasswd")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_unknown_route_when_requested_then_returns_json_not_found() {
    let app = create_test_app(test_settings(std::env::temp_dir()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Endpoint not found");
}

#[tokio::test]
async fn given_request_id_header_when_request_then_header_is_echoed() {
    let app = create_test_app(test_settings(std::env::temp_dir()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("x-request-id", "test-id-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-id-123"
    );
}

#[tokio::test]
async fn given_no_request_id_header_when_request_then_uuid_is_assigned() {
    let app = create_test_app(test_settings(std::env::temp_dir()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let id = response
        .headers()
        .get("x-request-id")
        .expect("middleware should assign an id")
        .to_str()
        .unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}
