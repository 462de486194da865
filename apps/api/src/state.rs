use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::SummaryModel;
use crate::mailer::Mailer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable for the life of the process; nothing is stored between requests.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. Default: `LlmClient` (Anthropic).
    pub llm: Arc<dyn SummaryModel>,
    /// The one delivery strategy selected by EMAIL_TRANSPORT.
    pub mailer: Arc<dyn Mailer>,
    pub config: Config,
}
