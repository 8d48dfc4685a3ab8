//! Workflow State — the per-run accumulator.
//!
//! Results live in three slots indexed by `Dimension::index()`, so the join
//! never depends on which branch finished first. Each slot is written once.

use crate::workflow::evaluation::EvaluationResult;
use crate::workflow::WorkflowError;

#[derive(Debug)]
pub struct WorkflowState {
    cv_text: String,
    slots: [Option<EvaluationResult>; 3],
}

impl WorkflowState {
    pub fn new(cv_text: impl Into<String>) -> Self {
        Self {
            cv_text: cv_text.into(),
            slots: [None, None, None],
        }
    }

    pub fn cv_text(&self) -> &str {
        &self.cv_text
    }

    /// Commits one branch's result into its dimension slot.
    pub fn record(&mut self, result: EvaluationResult) -> Result<(), WorkflowError> {
        let slot = &mut self.slots[result.dimension.index()];
        if slot.is_some() {
            return Err(WorkflowError::DuplicateResult(result.dimension));
        }
        *slot = Some(result);
        Ok(())
    }

    pub fn completed(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// The join barrier: succeeds only when every dimension has reported.
    pub fn join(self) -> Result<JoinedEvaluations, WorkflowError> {
        let completed = self.completed();
        match self.slots {
            [Some(overall), Some(education), Some(skills)] => Ok(JoinedEvaluations {
                overall,
                education,
                skills,
            }),
            _ => Err(WorkflowError::IncompleteJoin { completed }),
        }
    }
}

/// All three results, available only once the join has passed.
#[derive(Debug, Clone)]
pub struct JoinedEvaluations {
    pub overall: EvaluationResult,
    pub education: EvaluationResult,
    pub skills: EvaluationResult,
}

impl JoinedEvaluations {
    /// Scores in `[overall, education, skills]` order.
    pub fn scores(&self) -> [u8; 3] {
        [self.overall.score, self.education.score, self.skills.score]
    }

    pub fn into_vec(self) -> Vec<EvaluationResult> {
        vec![self.overall, self.education, self.skills]
    }
}
