use std::sync::Arc;

use serde_json::{Map, Value};

use crate::application::ports::{ChartRenderer, ChartRendererError, LlmClient, LlmClientError};
use crate::application::services::first_json_object;
use crate::domain::{DataPoint, MAX_SUMMARY_CHARS, ReportSchema, SearchResult};

/// Document excerpt length included in the prompt, in characters.
const DOC_EXCERPT_CHARS: usize = 600;

/// At most this many web results are formatted into the prompt.
const PROMPT_RESULT_LIMIT: usize = 5;

/// Web results referenced in the fallback findings.
const FALLBACK_REFERENCE_LIMIT: usize = 3;

const DEFAULT_FINDINGS: &str = "See executive summary for key findings";
const DEFAULT_RECOMMENDATIONS: &str = "See executive summary for recommendations";

/// Turns (topic, optional document text, optional web results) into a fully
/// populated [`ReportSchema`].
///
/// Every failure mode of the hosted model (missing credential, transport
/// error, non-success status, unparseable output) terminates in the
/// deterministic fallback structure; the only error that escapes is a
/// failure to render the fallback's own placeholder charts.
pub struct ReportSynthesizer<L, C>
where
    L: LlmClient,
    C: ChartRenderer,
{
    llm: Arc<L>,
    chart_renderer: Arc<C>,
}

impl<L, C> ReportSynthesizer<L, C>
where
    L: LlmClient,
    C: ChartRenderer,
{
    pub fn new(llm: Arc<L>, chart_renderer: Arc<C>) -> Self {
        Self { llm, chart_renderer }
    }

    #[tracing::instrument(skip_all, fields(topic = %topic))]
    pub async fn synthesize(
        &self,
        topic: &str,
        document_text: &str,
        web_results: &[SearchResult],
    ) -> Result<ReportSchema, SynthesisError> {
        let prompt = build_prompt(topic, document_text, web_results);

        let generated = match self.llm.generate(&prompt).await {
            Ok(text) => text,
            Err(LlmClientError::MissingCredential) => {
                tracing::warn!("Model credential missing, using fallback report");
                return self.fallback_structure(topic, document_text, web_results).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Model call failed, using fallback report");
                return self.fallback_structure(topic, document_text, web_results).await;
            }
        };

        tracing::debug!(
            output_excerpt = %generated.chars().take(200).collect::<String>(),
            "Model output received"
        );

        let Some(parsed) = first_json_object(&generated) else {
            tracing::warn!("Model did not return a recoverable JSON object, using fallback");
            return self.fallback_structure(topic, document_text, web_results).await;
        };

        let report = self.validate(parsed, topic).await?;
        tracing::info!(
            findings = report.key_findings.len(),
            charts = report.charts.len(),
            "Report structure generated"
        );
        Ok(report)
    }

    /// Normalize a recovered model object into a complete schema: coerce
    /// and bound the summary, substitute sentinels for absent or empty
    /// lists, and truncate every list field.
    async fn validate(
        &self,
        parsed: Map<String, Value>,
        topic: &str,
    ) -> Result<ReportSchema, SynthesisError> {
        let executive_summary = truncate_chars(
            &coerce_string(parsed.get("executive_summary"))
                .unwrap_or_else(|| format!("Analysis of {topic}")),
            MAX_SUMMARY_CHARS,
        );

        let mut key_findings = coerce_string_list(parsed.get("key_findings"));
        if key_findings.is_empty() {
            key_findings.push(DEFAULT_FINDINGS.to_string());
        }

        let mut charts = coerce_string_list(parsed.get("charts"));
        if charts.is_empty() {
            charts = self.trend_charts(topic).await?;
        }

        let mut recommendations = coerce_string_list(parsed.get("recommendations"));
        if recommendations.is_empty() {
            recommendations.push(DEFAULT_RECOMMENDATIONS.to_string());
        }

        let data_points: Vec<DataPoint> = parsed
            .get("data_points")
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        let mut report = ReportSchema {
            title: coerce_string(parsed.get("title")),
            executive_summary,
            key_findings,
            detailed_analysis: coerce_string(parsed.get("detailed_analysis")),
            data_points,
            charts,
            recommendations,
            citations: coerce_string_list(parsed.get("citations")),
        };
        report.truncate_lists();
        Ok(report)
    }

    /// Deterministic substitute used whenever the hosted model is
    /// unavailable or returns unusable output.
    async fn fallback_structure(
        &self,
        topic: &str,
        document_text: &str,
        web_results: &[SearchResult],
    ) -> Result<ReportSchema, SynthesisError> {
        let mut summary = format!("Analysis of {topic}");
        if !document_text.is_empty() {
            summary.push_str(&format!(
                ". Document provided with {} characters.",
                document_text.chars().count()
            ));
        }
        if !web_results.is_empty() {
            summary.push_str(&format!(" {} web sources analyzed.", web_results.len()));
        }

        let mut findings = Vec::new();
        if !document_text.is_empty() {
            findings.push(format!("Document contains information about {topic}"));
        }
        for result in web_results.iter().take(FALLBACK_REFERENCE_LIMIT) {
            let title = if result.title.is_empty() {
                "Source"
            } else {
                result.title.as_str()
            };
            findings.push(format!("Reference: {title}"));
        }
        if findings.is_empty() {
            findings.push("Processing complete".to_string());
        }

        let mut report = ReportSchema {
            title: None,
            executive_summary: summary,
            key_findings: findings,
            detailed_analysis: None,
            data_points: Vec::new(),
            charts: self.trend_charts(topic).await?,
            recommendations: vec![
                "Review the provided sources".to_string(),
                "Consider additional research".to_string(),
            ],
            citations: Vec::new(),
        };
        report.truncate_lists();
        Ok(report)
    }

    /// Exactly two generic placeholder plots carried inside the schema.
    async fn trend_charts(&self, topic: &str) -> Result<Vec<String>, SynthesisError> {
        Ok(vec![
            self.chart_renderer
                .render_placeholder(&format!("{topic} Trend 1"))
                .await?,
            self.chart_renderer
                .render_placeholder(&format!("{topic} Trend 2"))
                .await?,
        ])
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("fallback chart rendering failed: {0}")]
    PlaceholderChart(#[from] ChartRendererError),
}

fn build_prompt(topic: &str, document_text: &str, web_results: &[SearchResult]) -> String {
    let doc_excerpt: String = document_text.chars().take(DOC_EXCERPT_CHARS).collect();

    let mut web_context = String::new();
    for (i, result) in web_results.iter().take(PROMPT_RESULT_LIMIT).enumerate() {
        web_context.push_str(&format!(
            "{}. {}\n   Source: {}\n   {}\n",
            i + 1,
            result.title,
            result.source,
            result.description
        ));
    }

    format!(
        "Generate a JSON report about the topic: {topic}.\n\n\
         Include keys: executive_summary (string), key_findings (list), \
         charts (list), recommendations (list). Only return valid JSON.\n\n\
         Document excerpt: {doc_excerpt}\n{web_context}\n"
    )
}

/// String passthrough for strings; JSON rendering for other non-null
/// scalars and structures; `None` for null or absent values.
fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn coerce_string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(|v| coerce_string(Some(v))).collect())
        .unwrap_or_default()
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
