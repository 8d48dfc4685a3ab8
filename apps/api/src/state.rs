use std::sync::Arc;

use crate::config::Config;
use crate::scoring::ScoringClient;
use crate::workflow::CvWorkflow;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Evaluation workflow over a pluggable scorer. Default: `LlmClient`.
    pub workflow: CvWorkflow,
}

impl AppState {
    pub fn new(config: Config, scorer: Arc<dyn ScoringClient>) -> Self {
        Self {
            config,
            workflow: CvWorkflow::new(scorer),
        }
    }
}
