use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in each list field of a report.
pub const MAX_LIST_ITEMS: usize = 5;

/// Maximum length of an executive summary, in characters.
pub const MAX_SUMMARY_CHARS: usize = 1000;

/// A single labeled value supplied by the model for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

/// The fully populated report structure handed from the synthesizer to the
/// assembler. Once it leaves the synthesizer every list field is non-empty
/// (placeholders substituted) and bounded to [`MAX_LIST_ITEMS`] entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub executive_summary: String,
    pub key_findings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_points: Vec<DataPoint>,
    /// Encoded placeholder images carried inside the schema itself
    /// (data URIs). Distinct from the pipeline-level chart images rendered
    /// from `data_points`.
    pub charts: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<String>,
}

impl ReportSchema {
    /// Truncate every bounded list field to [`MAX_LIST_ITEMS`] entries.
    pub fn truncate_lists(&mut self) {
        self.key_findings.truncate(MAX_LIST_ITEMS);
        self.charts.truncate(MAX_LIST_ITEMS);
        self.recommendations.truncate(MAX_LIST_ITEMS);
    }
}
