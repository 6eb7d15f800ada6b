use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        llm::{parse::SuggestionParser, LlmClient},
        providers::CatalogProvider,
    },
};

/// Shared application state
///
/// Every collaborator is a trait object built once at startup and
/// injected here, so tests can swap in stubs without touching the
/// router. Configuration is immutable after load; nothing reads the
/// environment during a request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub llm: Arc<dyn LlmClient>,
    pub parser: Arc<dyn SuggestionParser>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state from already-built collaborators
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        llm: Arc<dyn LlmClient>,
        parser: Arc<dyn SuggestionParser>,
        config: Config,
    ) -> Self {
        Self {
            catalog,
            llm,
            parser,
            config: Arc::new(config),
        }
    }
}
