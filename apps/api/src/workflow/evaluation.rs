//! Evaluation Tasks — one per dimension, each a single `score` call over the CV text.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::scoring::prompts::EVALUATION_PROMPT_TEMPLATE;
use crate::scoring::{ScoringClient, ScoringError};

/// One of the three independent evaluation axes.
///
/// Declaration order is the reporting order: `individual_scores` is always
/// `[Overall, Education, Skills]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Overall,
    Education,
    Skills,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Overall, Dimension::Education, Dimension::Skills];

    /// Fixed slot index of this dimension in the workflow state and in reports.
    pub fn index(self) -> usize {
        match self {
            Dimension::Overall => 0,
            Dimension::Education => 1,
            Dimension::Skills => 2,
        }
    }

    /// Phrase substituted into the evaluation prompt.
    pub fn prompt_label(self) -> &'static str {
        match self {
            Dimension::Overall => "overall quality",
            Dimension::Education => "Education section",
            Dimension::Skills => "Skills section",
        }
    }

    /// Heading used when rendering the score breakdown.
    pub fn display_name(self) -> &'static str {
        match self {
            Dimension::Overall => "Overall Quality",
            Dimension::Education => "Education",
            Dimension::Skills => "Skills",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Output of one Evaluation Task. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub dimension: Dimension,
    pub feedback: String,
    pub score: u8,
}

pub fn build_evaluation_prompt(dimension: Dimension, cv_text: &str) -> String {
    EVALUATION_PROMPT_TEMPLATE
        .replace("{dimension}", dimension.prompt_label())
        .replace("{cv_text}", cv_text)
}

/// Runs one Evaluation Task. An empty CV is evaluated like any other text.
pub async fn evaluate_dimension(
    dimension: Dimension,
    cv_text: &str,
    scorer: &dyn ScoringClient,
) -> Result<EvaluationResult, ScoringError> {
    let prompt = build_evaluation_prompt(dimension, cv_text);
    debug!("Evaluating {dimension} ({} prompt chars)", prompt.len());

    let scored = scorer.score(&prompt).await?;

    Ok(EvaluationResult {
        dimension,
        feedback: scored.feedback,
        score: scored.score,
    })
}
