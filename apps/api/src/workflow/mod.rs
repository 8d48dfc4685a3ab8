//! CV evaluation workflow.
//!
//! Start → {Overall, Education, Skills} (concurrent) → Join → Aggregate → Done.
//! A run either yields a complete `FinalReport` or a `WorkflowError` naming the
//! stage that failed. Nothing partial ever leaves this module.

use thiserror::Error;

use crate::scoring::ScoringError;

pub mod aggregator;
pub mod evaluation;
pub mod orchestrator;
pub mod state;

pub use aggregator::FinalReport;
pub use evaluation::Dimension;
pub use orchestrator::CvWorkflow;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{dimension} evaluation failed: {source}")]
    Evaluation {
        dimension: Dimension,
        #[source]
        source: ScoringError,
    },

    #[error("improvement summary failed: {0}")]
    Summary(#[source] ScoringError),

    #[error("{0} evaluation was recorded twice")]
    DuplicateResult(Dimension),

    #[error("join reached with {completed} of 3 evaluations")]
    IncompleteJoin { completed: usize },
}

impl WorkflowError {
    /// Name of the stage that failed, for callers that report it to users.
    pub fn stage(&self) -> &'static str {
        match self {
            WorkflowError::Evaluation { .. } => "evaluation",
            WorkflowError::Summary(_) => "summary",
            WorkflowError::DuplicateResult(_) | WorkflowError::IncompleteJoin { .. } => "join",
        }
    }
}
