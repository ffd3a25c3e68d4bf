use std::sync::Arc;

use tokio::sync::Mutex;

use crate::coaching::catalog::RoleCatalog;
use crate::coaching::parser::ResponseParser;
use crate::config::Config;
use crate::history::store::InteractionLog;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model-inference collaborator. Default: the Hugging Face `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    /// Pluggable response parser. Default: `MarkerParser`.
    pub parser: Arc<dyn ResponseParser>,
    /// The session's interaction log. Locked only for append/read, never across a model call.
    pub log: Arc<Mutex<InteractionLog>>,
    pub catalog: Arc<RoleCatalog>,
    pub config: Config,
}
