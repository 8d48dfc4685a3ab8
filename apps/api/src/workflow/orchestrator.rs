//! Workflow Orchestrator — fans the CV out to the three Evaluation Tasks,
//! joins them, then hands the joined state to the Aggregator.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::scoring::ScoringClient;
use crate::workflow::aggregator::{aggregate, FinalReport};
use crate::workflow::evaluation::{evaluate_dimension, Dimension, EvaluationResult};
use crate::workflow::state::WorkflowState;
use crate::workflow::WorkflowError;

/// Entry point consumed by the presentation layer.
#[derive(Clone)]
pub struct CvWorkflow {
    scorer: Arc<dyn ScoringClient>,
}

impl CvWorkflow {
    pub fn new(scorer: Arc<dyn ScoringClient>) -> Self {
        Self { scorer }
    }

    /// Runs one evaluation of `cv_text` to completion.
    ///
    /// The three branches are polled concurrently. The first branch error
    /// drops the remaining in-flight branches and fails the run.
    pub async fn run(&self, cv_text: &str) -> Result<FinalReport, WorkflowError> {
        let run_id = Uuid::new_v4();
        let mut state = WorkflowState::new(cv_text);
        info!("Run {run_id}: evaluating CV ({} chars)", state.cv_text().len());

        let branches = tokio::try_join!(
            self.branch(run_id, Dimension::Overall, state.cv_text()),
            self.branch(run_id, Dimension::Education, state.cv_text()),
            self.branch(run_id, Dimension::Skills, state.cv_text()),
        );
        let (overall, education, skills) = branches.inspect_err(|e| {
            warn!("Run {run_id}: aborted at {} stage: {e}", e.stage());
        })?;

        for result in [overall, education, skills] {
            state.record(result)?;
        }
        let joined = state.join()?;

        let report = aggregate(run_id, joined, self.scorer.as_ref())
            .await
            .inspect_err(|e| warn!("Run {run_id}: aborted at {} stage: {e}", e.stage()))?;

        info!(
            "Run {run_id}: done, scores {:?}, average {:.2}",
            report.individual_scores, report.average_score
        );
        Ok(report)
    }

    async fn branch(
        &self,
        run_id: Uuid,
        dimension: Dimension,
        cv_text: &str,
    ) -> Result<EvaluationResult, WorkflowError> {
        let result = evaluate_dimension(dimension, cv_text, self.scorer.as_ref())
            .await
            .map_err(|source| WorkflowError::Evaluation { dimension, source })?;
        info!("Run {run_id}: {dimension} scored {}/10", result.score);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::scoring::mock::{MockEvaluation, MockFreeform, MockScoringClient};
    use crate::scoring::ScoringError;
    use crate::workflow::aggregator::NO_IMPROVEMENT_SUMMARY;

    const CV: &str = "Jane Doe\nEducation: MSc Computer Science\nSkills: Rust, SQL, Kubernetes";

    fn workflow(scorer: &Arc<MockScoringClient>) -> CvWorkflow {
        CvWorkflow::new(scorer.clone())
    }

    #[tokio::test]
    async fn test_high_scores_produce_fixed_summary() {
        let scorer = Arc::new(MockScoringClient::with_scores(8, 6, 9));
        let report = workflow(&scorer).run(CV).await.unwrap();

        assert_eq!(report.individual_scores, [8, 6, 9]);
        assert!((report.average_score - 7.666_666_666).abs() < 1e-6);
        assert_eq!(report.summary, NO_IMPROVEMENT_SUMMARY);
        assert_eq!(scorer.score_calls(), 3);
        assert_eq!(scorer.freeform_calls(), 0);
    }

    #[tokio::test]
    async fn test_low_scores_request_one_summary() {
        let scorer = Arc::new(
            MockScoringClient::with_scores(3, 5, 4)
                .with_freeform(MockFreeform::Text("Rewrite the skills list.".to_string())),
        );
        let report = workflow(&scorer).run(CV).await.unwrap();

        assert_eq!(report.individual_scores, [3, 5, 4]);
        assert_eq!(report.average_score, 4.0);
        assert_eq!(report.summary, "Rewrite the skills list.");
        assert_eq!(scorer.freeform_calls(), 1);
        let prompt = &scorer.freeform_prompts()[0];
        for feedback in ["Overall Quality feedback", "Education feedback", "Skills feedback"] {
            assert!(prompt.contains(feedback), "missing {feedback} in {prompt}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_scores_keep_dimension_order_when_completion_is_reversed() {
        let scorer = Arc::new(
            MockScoringClient::with_scores(2, 7, 10)
                .with_delay(Dimension::Overall, Duration::from_millis(300))
                .with_delay(Dimension::Education, Duration::from_millis(200))
                .with_delay(Dimension::Skills, Duration::from_millis(100)),
        );
        let report = workflow(&scorer).run(CV).await.unwrap();

        assert_eq!(
            scorer.answered(),
            vec![Dimension::Skills, Dimension::Education, Dimension::Overall]
        );
        assert_eq!(report.individual_scores, [2, 7, 10]);
        assert_eq!(report.evaluations[0].dimension, Dimension::Overall);
    }

    #[tokio::test(start_paused = true)]
    async fn test_branches_run_concurrently() {
        let scorer = Arc::new(
            MockScoringClient::with_scores(8, 8, 8)
                .with_delay(Dimension::Overall, Duration::from_secs(1))
                .with_delay(Dimension::Education, Duration::from_secs(1))
                .with_delay(Dimension::Skills, Duration::from_secs(1)),
        );
        let started = tokio::time::Instant::now();
        workflow(&scorer).run(CV).await.unwrap();
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_out_of_range_score_fails_run() {
        let scorer = Arc::new(
            MockScoringClient::with_scores(8, 6, 9)
                .with_evaluation(Dimension::Skills, MockEvaluation::scored("Superb", 15)),
        );
        let err = workflow(&scorer).run(CV).await.unwrap_err();

        match err {
            WorkflowError::Evaluation { dimension, source } => {
                assert_eq!(dimension, Dimension::Skills);
                assert!(matches!(source, ScoringError::ScoreOutOfRange(15)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(scorer.freeform_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_branch_cancels_pending_branches() {
        let scorer = Arc::new(
            MockScoringClient::with_scores(8, 6, 9)
                .with_evaluation(Dimension::Overall, MockEvaluation::ServiceDown)
                .with_delay(Dimension::Education, Duration::from_secs(5))
                .with_delay(Dimension::Skills, Duration::from_secs(5)),
        );
        let err = workflow(&scorer).run(CV).await.unwrap_err();

        assert_eq!(err.stage(), "evaluation");
        assert_eq!(scorer.answered(), vec![Dimension::Overall]);
        assert_eq!(scorer.freeform_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_cv_still_runs() {
        let scorer = Arc::new(MockScoringClient::with_scores(0, 0, 0));
        let report = workflow(&scorer).run("").await.unwrap();
        assert_eq!(report.individual_scores, [0, 0, 0]);
        assert_eq!(report.average_score, 0.0);
        assert_eq!(scorer.freeform_calls(), 1);
    }

    #[tokio::test]
    async fn test_each_run_gets_fresh_state() {
        let scorer = Arc::new(MockScoringClient::with_scores(9, 9, 9));
        let wf = workflow(&scorer);
        let first = wf.run(CV).await.unwrap();
        let second = wf.run(CV).await.unwrap();

        assert_ne!(first.run_id, second.run_id);
        assert_eq!(second.individual_scores.len(), 3);
        assert_eq!(scorer.score_calls(), 6);
    }
}
