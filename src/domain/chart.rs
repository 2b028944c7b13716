use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
}

impl ChartKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Bar => "Data Overview",
            Self::Pie => "Distribution Analysis",
        }
    }
}

/// A rasterized chart produced from the report's data points. Lives only
/// for the duration of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ChartImage {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// PNG bytes, base64-encoded.
    pub image: String,
    pub title: String,
}

impl ChartImage {
    pub fn new(kind: ChartKind, image: String) -> Self {
        Self {
            kind,
            image,
            title: kind.title().to_string(),
        }
    }
}
