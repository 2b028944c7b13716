pub mod charts;
pub mod llm;
pub mod observability;
pub mod report;
pub mod search;
pub mod text_processing;
