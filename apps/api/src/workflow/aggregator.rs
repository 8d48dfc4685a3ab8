//! Aggregator — averages the joined scores and decides whether to ask for
//! improvement advice.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::scoring::prompts::IMPROVEMENT_PROMPT_TEMPLATE;
use crate::scoring::ScoringClient;
use crate::workflow::evaluation::EvaluationResult;
use crate::workflow::state::JoinedEvaluations;
use crate::workflow::WorkflowError;

/// Averages strictly below this request an improvement summary.
pub const IMPROVEMENT_THRESHOLD: f64 = 7.0;

/// Summary used at or above the threshold. No model call is made.
pub const NO_IMPROVEMENT_SUMMARY: &str = "Good CV. No major improvements required.";

/// Result of one completed workflow run.
#[derive(Debug, Clone, Serialize)]
pub struct FinalReport {
    pub run_id: Uuid,
    pub average_score: f64,
    pub summary: String,
    /// `[overall, education, skills]` — consumers index positionally.
    pub individual_scores: [u8; 3],
    /// Whether `summary` came from the model rather than the fixed message.
    pub improvement_requested: bool,
    /// Per-dimension feedback, in the same order as `individual_scores`.
    pub evaluations: Vec<EvaluationResult>,
    pub evaluated_at: DateTime<Utc>,
}

/// Arithmetic mean, keeping the fractional part.
pub fn average_score(scores: &[u8; 3]) -> f64 {
    scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64
}

pub fn needs_improvement(average_score: f64) -> bool {
    average_score < IMPROVEMENT_THRESHOLD
}

/// Embeds the unrounded average (`4.0`, `6.333333333333333`).
pub fn build_improvement_prompt(joined: &JoinedEvaluations, average_score: f64) -> String {
    IMPROVEMENT_PROMPT_TEMPLATE
        .replace("{average_score}", &format!("{average_score:?}"))
        .replace("{overall_feedback}", &joined.overall.feedback)
        .replace("{education_feedback}", &joined.education.feedback)
        .replace("{skills_feedback}", &joined.skills.feedback)
}

/// Runs the Aggregate step. Only reachable with a `JoinedEvaluations`, i.e. after the join.
///
/// A failed summary call fails the run; it never degrades to the fixed message.
pub async fn aggregate(
    run_id: Uuid,
    joined: JoinedEvaluations,
    scorer: &dyn ScoringClient,
) -> Result<FinalReport, WorkflowError> {
    let individual_scores = joined.scores();
    let average_score = average_score(&individual_scores);
    let improvement_requested = needs_improvement(average_score);

    let summary = if improvement_requested {
        info!("Run {run_id}: average {average_score:.2} below {IMPROVEMENT_THRESHOLD}, requesting improvement summary");
        let prompt = build_improvement_prompt(&joined, average_score);
        scorer
            .freeform(&prompt)
            .await
            .map_err(WorkflowError::Summary)?
    } else {
        info!("Run {run_id}: average {average_score:.2}, no improvement summary needed");
        NO_IMPROVEMENT_SUMMARY.to_string()
    };

    Ok(FinalReport {
        run_id,
        average_score,
        summary,
        individual_scores,
        improvement_requested,
        evaluations: joined.into_vec(),
        evaluated_at: Utc::now(),
    })
}
