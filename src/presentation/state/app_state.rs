use std::sync::Arc;

use crate::application::ports::{
    ChartRenderer, FileLoader, LlmClient, ReportAssembler, SearchProvider,
};
use crate::application::services::ReportService;
use crate::presentation::config::Settings;

pub struct AppState<F, S, L, C, A>
where
    F: FileLoader,
    S: SearchProvider,
    L: LlmClient,
    C: ChartRenderer,
    A: ReportAssembler,
{
    pub report_service: Arc<ReportService<F, S, L, C, A>>,
    pub settings: Settings,
}

impl<F, S, L, C, A> Clone for AppState<F, S, L, C, A>
where
    F: FileLoader,
    S: SearchProvider,
    L: LlmClient,
    C: ChartRenderer,
    A: ReportAssembler,
{
    fn clone(&self) -> Self {
        Self {
            report_service: Arc::clone(&self.report_service),
            settings: self.settings.clone(),
        }
    }
}
