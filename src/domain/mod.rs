mod artifact;
mod chart;
mod report;
mod search_result;

pub use artifact::ReportArtifact;
pub use chart::{ChartImage, ChartKind};
pub use report::{DataPoint, MAX_LIST_ITEMS, MAX_SUMMARY_CHARS, ReportSchema};
pub use search_result::SearchResult;
