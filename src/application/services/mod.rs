mod json_extract;
mod report_service;
mod report_synthesizer;
mod web_search_service;

pub use json_extract::first_json_object;
pub use report_service::{GeneratedReport, PipelineError, ReportService};
pub use report_synthesizer::{ReportSynthesizer, SynthesisError};
pub use web_search_service::WebSearchService;
