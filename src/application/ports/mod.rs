mod chart_renderer;
mod file_loader;
mod llm_client;
mod report_assembler;
mod search_provider;

pub use chart_renderer::{ChartRenderer, ChartRendererError};
pub use file_loader::{FileLoader, FileLoaderError, Table};
pub use llm_client::{LlmClient, LlmClientError};
pub use report_assembler::{AssemblerError, ReportAssembler};
pub use search_provider::{SearchProvider, SearchProviderError};
