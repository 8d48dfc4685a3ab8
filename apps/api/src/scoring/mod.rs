//! Scoring Client — the narrow seam between the workflow and the language model.
//!
//! The workflow only ever sees `Arc<dyn ScoringClient>`. `LlmClient` is the
//! production backend; tests swap in `mock::MockScoringClient`.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::llm_client::prompts::{EVIDENCE_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::scoring::prompts::{IMPROVEMENT_SYSTEM, SCORE_SYSTEM};

#[cfg(test)]
pub mod mock;
pub mod prompts;

/// Highest score a dimension can receive.
pub const MAX_SCORE: u8 = 10;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("scoring service call failed: {0}")]
    Service(#[from] LlmError),

    #[error("model output is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("score {0} is outside the allowed range 0-10")]
    ScoreOutOfRange(i64),

    #[error("model returned an empty response")]
    EmptyResponse,
}

/// Structured output of a `score` call, as the model sent it.
/// Every field is optional so that omissions are reported as `MissingField`
/// instead of an opaque parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvaluation {
    pub feedback: Option<String>,
    pub score: Option<i64>,
}

/// A validated `score` result: non-blank feedback and a score in 0..=10.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredFeedback {
    pub feedback: String,
    pub score: u8,
}

/// The scoring trait. Implement this to swap the model backend without touching
/// the workflow.
#[async_trait]
pub trait ScoringClient: Send + Sync {
    /// Sends an evaluation prompt and returns validated feedback plus score.
    async fn score(&self, prompt: &str) -> Result<ScoredFeedback, ScoringError>;

    /// Sends a free-form prompt and returns the model's text.
    async fn freeform(&self, prompt: &str) -> Result<String, ScoringError>;
}

/// Checks the model's structured output against the evaluation schema.
pub fn validate_evaluation(raw: RawEvaluation) -> Result<ScoredFeedback, ScoringError> {
    let feedback = raw
        .feedback
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .ok_or(ScoringError::MissingField("feedback"))?;
    let score = raw.score.ok_or(ScoringError::MissingField("score"))?;

    match u8::try_from(score) {
        Ok(score) if score <= MAX_SCORE => Ok(ScoredFeedback { feedback, score }),
        _ => Err(ScoringError::ScoreOutOfRange(score)),
    }
}

#[async_trait]
impl ScoringClient for LlmClient {
    async fn score(&self, prompt: &str) -> Result<ScoredFeedback, ScoringError> {
        let system = format!("{SCORE_SYSTEM}\n{EVIDENCE_INSTRUCTION}\n{JSON_ONLY_SYSTEM}");
        let raw: RawEvaluation = self.call_json(prompt, &system).await?;
        validate_evaluation(raw)
    }

    async fn freeform(&self, prompt: &str) -> Result<String, ScoringError> {
        match self.call_text(prompt, IMPROVEMENT_SYSTEM).await {
            Ok(text) => Ok(text),
            Err(LlmError::EmptyContent) => Err(ScoringError::EmptyResponse),
            Err(e) => Err(ScoringError::Service(e)),
        }
    }
}
