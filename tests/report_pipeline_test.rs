use std::sync::Arc;

use reportal::application::ports::{
    ChartRenderer, ChartRendererError, LlmClient, LlmClientError, SearchProvider,
    SearchProviderError,
};
use reportal::application::services::{ReportSynthesizer, WebSearchService};
use reportal::domain::{ChartImage, DataPoint, MAX_LIST_ITEMS, SearchResult};

struct StubChartRenderer;

#[async_trait::async_trait]
impl ChartRenderer for StubChartRenderer {
    async fn render(
        &self,
        _data_points: &[DataPoint],
    ) -> Result<Vec<ChartImage>, ChartRendererError> {
        Ok(Vec::new())
    }

    async fn render_placeholder(&self, title: &str) -> Result<String, ChartRendererError> {
        Ok(format!("data:image/png;base64,stub-{title}"))
    }
}

struct UnconfiguredLlm;

#[async_trait::async_trait]
impl LlmClient for UnconfiguredLlm {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Err(LlmClientError::MissingCredential)
    }
}

struct CannedLlm(&'static str);

#[async_trait::async_trait]
impl LlmClient for CannedLlm {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Ok(self.0.to_string())
    }
}

struct FailingSearchProvider;

#[async_trait::async_trait]
impl SearchProvider for FailingSearchProvider {
    async fn search(
        &self,
        _query: &str,
        _count: usize,
    ) -> Result<Vec<SearchResult>, SearchProviderError> {
        Err(SearchProviderError::MissingCredential)
    }

    async fn search_news(
        &self,
        _query: &str,
        _count: usize,
    ) -> Result<Vec<SearchResult>, SearchProviderError> {
        Err(SearchProviderError::ApiRequestFailed("boom".to_string()))
    }
}

fn result_titled(title: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        description: "desc".to_string(),
        url: "https://example.org".to_string(),
        source: "example.org".to_string(),
        date: None,
    }
}

fn synthesizer<L: LlmClient>(llm: L) -> ReportSynthesizer<L, StubChartRenderer> {
    ReportSynthesizer::new(Arc::new(llm), Arc::new(StubChartRenderer))
}

#[tokio::test]
async fn given_no_credential_and_no_inputs_when_synthesize_then_minimal_fallback() {
    let report = synthesizer(UnconfiguredLlm)
        .synthesize("solar power", "", &[])
        .await
        .unwrap();

    assert_eq!(report.executive_summary, "Analysis of solar power");
    assert_eq!(report.key_findings, vec!["Processing complete"]);
    assert_eq!(
        report.recommendations,
        vec!["Review the provided sources", "Consider additional research"]
    );
    assert_eq!(report.charts.len(), 2);
    assert!(report.charts[0].starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn given_document_and_results_when_fallback_then_findings_reference_sources() {
    let results: Vec<SearchResult> = (1..=4).map(|i| result_titled(&format!("S{i}"))).collect();

    let report = synthesizer(UnconfiguredLlm)
        .synthesize("wind power", "some document text", &results)
        .await
        .unwrap();

    assert!(report.executive_summary.contains("Document provided with"));
    assert!(report.executive_summary.contains("4 web sources analyzed"));
    assert_eq!(report.key_findings.len(), 4);
    assert_eq!(
        report.key_findings[0],
        "Document contains information about wind power"
    );
    // References are capped at three even with four results available.
    assert_eq!(report.key_findings[1], "Reference: S1");
    assert_eq!(report.key_findings[3], "Reference: S3");
}

#[tokio::test]
async fn given_chatter_wrapped_json_when_synthesize_then_object_is_recovered() {
    let llm = CannedLlm(
        r#"Sure! Here is your report: {"executive_summary": "Wave energy is niche.",
        "key_findings": ["Pilot plants only"], "charts": ["c1"],
        "recommendations": ["Fund research"]} Hope this helps!"#,
    );

    let report = synthesizer(llm)
        .synthesize("wave energy", "", &[])
        .await
        .unwrap();

    assert_eq!(report.executive_summary, "Wave energy is niche.");
    assert_eq!(report.key_findings, vec!["Pilot plants only"]);
    assert_eq!(report.charts, vec!["c1"]);
}

#[tokio::test]
async fn given_oversized_model_lists_when_synthesize_then_lists_are_bounded() {
    let llm = CannedLlm(
        r#"{"executive_summary": "s",
        "key_findings": ["1","2","3","4","5","6","7","8"],
        "charts": ["c"],
        "recommendations": ["r1","r2","r3","r4","r5","r6"]}"#,
    );

    let report = synthesizer(llm).synthesize("t", "", &[]).await.unwrap();

    assert_eq!(report.key_findings.len(), MAX_LIST_ITEMS);
    assert_eq!(report.recommendations.len(), MAX_LIST_ITEMS);
}

#[tokio::test]
async fn given_empty_model_lists_when_synthesize_then_sentinels_substituted() {
    let llm = CannedLlm(r#"{"executive_summary": "s", "key_findings": [], "recommendations": []}"#);

    let report = synthesizer(llm).synthesize("t", "", &[]).await.unwrap();

    assert_eq!(
        report.key_findings,
        vec!["See executive summary for key findings"]
    );
    assert_eq!(
        report.recommendations,
        vec!["See executive summary for recommendations"]
    );
    // Absent charts are replaced by the two placeholder trend plots.
    assert_eq!(report.charts.len(), 2);
}

#[tokio::test]
async fn given_non_json_model_output_when_synthesize_then_fallback_applies() {
    let llm = CannedLlm("I am sorry, I cannot produce a report right now.");

    let report = synthesizer(llm).synthesize("geothermal", "", &[]).await.unwrap();

    assert_eq!(report.executive_summary, "Analysis of geothermal");
    assert_eq!(report.key_findings, vec!["Processing complete"]);
}

#[tokio::test]
async fn given_failing_provider_when_search_then_sentinel_result_substituted() {
    let service = WebSearchService::new(Arc::new(FailingSearchProvider));

    let results = service.search("anything", 5).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Sample Result 1");
    assert_eq!(results[0].source, "example.com");
}

#[tokio::test]
async fn given_failing_provider_when_search_news_then_empty_results() {
    let service = WebSearchService::new(Arc::new(FailingSearchProvider));

    let results = service.search_news("anything", 5).await;

    assert!(results.is_empty());
}
