use std::sync::Arc;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::interview::store::InterviewStore;
use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every backend sits behind a trait so tests can swap in doubles.
#[derive(Clone)]
pub struct AppState {
    pub interviews: Arc<dyn InterviewStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub llm: Arc<dyn CompletionProvider>,
    pub config: Config,
}
