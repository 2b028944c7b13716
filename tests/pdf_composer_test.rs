use reportal::application::ports::ReportAssembler;
use reportal::domain::{ChartImage, ChartKind, ReportSchema};
use reportal::infrastructure::report::PdfComposer;

fn full_report() -> ReportSchema {
    ReportSchema {
        title: Some("Quarterly Energy Outlook".to_string()),
        executive_summary: "Summary of the quarter.".to_string(),
        key_findings: vec!["Capacity doubled".to_string()],
        detailed_analysis: Some("Longer analysis text.".to_string()),
        data_points: Vec::new(),
        charts: Vec::new(),
        recommendations: vec!["Expand grid storage".to_string()],
        citations: vec!["https://example.org/source".to_string()],
    }
}

// Exercises the full font cascade; passes on any host with Liberation or
// DejaVu installed.
#[tokio::test]
async fn given_populated_report_when_compose_then_pdf_written_to_artifact_dir() {
    let dir = tempfile::tempdir().unwrap();
    let composer = PdfComposer::new(dir.path().to_path_buf());

    let artifact = composer
        .compose(&full_report(), &[])
        .await
        .expect("system fonts should be discovered");

    assert!(artifact.filename.ends_with(".pdf"));
    assert!(artifact.path.starts_with(dir.path()));
    let bytes = std::fs::read(&artifact.path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn given_undecodable_chart_when_compose_then_chart_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let composer = PdfComposer::new(dir.path().to_path_buf());
    // Valid base64 that does not decode to an image.
    let charts = vec![ChartImage::new(ChartKind::Bar, "AAAA".to_string())];

    let artifact = composer.compose(&full_report(), &charts).await.unwrap();

    assert!(artifact.path.exists());
}
