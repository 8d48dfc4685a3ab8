//! Deterministic `ScoringClient` double for workflow and router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::llm_client::LlmError;
use crate::scoring::{
    validate_evaluation, RawEvaluation, ScoredFeedback, ScoringClient, ScoringError,
};
use crate::workflow::evaluation::{build_evaluation_prompt, Dimension};

#[derive(Debug, Clone)]
pub enum MockEvaluation {
    /// Raw model output; still goes through `validate_evaluation`.
    Scored { feedback: String, score: i64 },
    ServiceDown,
}

impl MockEvaluation {
    pub fn scored(feedback: impl Into<String>, score: i64) -> Self {
        MockEvaluation::Scored {
            feedback: feedback.into(),
            score,
        }
    }
}

#[derive(Debug, Clone)]
pub enum MockFreeform {
    Text(String),
    ServiceDown,
}

pub struct MockScoringClient {
    evaluations: HashMap<Dimension, MockEvaluation>,
    delays: HashMap<Dimension, Duration>,
    freeform: MockFreeform,
    score_calls: AtomicUsize,
    freeform_prompts: Mutex<Vec<String>>,
    answered: Mutex<Vec<Dimension>>,
}

impl MockScoringClient {
    /// Scores per dimension with feedback "<Dimension> feedback".
    pub fn with_scores(overall: i64, education: i64, skills: i64) -> Self {
        let evaluations = Dimension::ALL
            .into_iter()
            .zip([overall, education, skills])
            .map(|(d, score)| (d, MockEvaluation::scored(format!("{d} feedback"), score)))
            .collect();

        Self {
            evaluations,
            delays: HashMap::new(),
            freeform: MockFreeform::Text("Quantify achievements and list tooling.".to_string()),
            score_calls: AtomicUsize::new(0),
            freeform_prompts: Mutex::new(Vec::new()),
            answered: Mutex::new(Vec::new()),
        }
    }

    pub fn with_evaluation(mut self, dimension: Dimension, evaluation: MockEvaluation) -> Self {
        self.evaluations.insert(dimension, evaluation);
        self
    }

    /// Delays the answer for one dimension, to reorder completion.
    pub fn with_delay(mut self, dimension: Dimension, delay: Duration) -> Self {
        self.delays.insert(dimension, delay);
        self
    }

    pub fn with_freeform(mut self, freeform: MockFreeform) -> Self {
        self.freeform = freeform;
        self
    }

    pub fn score_calls(&self) -> usize {
        self.score_calls.load(Ordering::SeqCst)
    }

    pub fn freeform_calls(&self) -> usize {
        self.freeform_prompts.lock().unwrap().len()
    }

    pub fn freeform_prompts(&self) -> Vec<String> {
        self.freeform_prompts.lock().unwrap().clone()
    }

    /// Dimensions in the order their `score` calls returned.
    pub fn answered(&self) -> Vec<Dimension> {
        self.answered.lock().unwrap().clone()
    }
}

fn dimension_for(prompt: &str) -> Dimension {
    Dimension::ALL
        .into_iter()
        .find(|d| prompt.starts_with(&build_evaluation_prompt(*d, "")))
        .unwrap_or_else(|| panic!("unrecognised evaluation prompt: {prompt}"))
}

fn service_down() -> ScoringError {
    ScoringError::Service(LlmError::Api {
        status: 503,
        message: "scoring service unavailable".to_string(),
    })
}

#[async_trait]
impl ScoringClient for MockScoringClient {
    async fn score(&self, prompt: &str) -> Result<ScoredFeedback, ScoringError> {
        self.score_calls.fetch_add(1, Ordering::SeqCst);
        let dimension = dimension_for(prompt);

        if let Some(delay) = self.delays.get(&dimension) {
            tokio::time::sleep(*delay).await;
        }
        self.answered.lock().unwrap().push(dimension);

        match self.evaluations.get(&dimension).cloned() {
            Some(MockEvaluation::Scored { feedback, score }) => validate_evaluation(RawEvaluation {
                feedback: Some(feedback),
                score: Some(score),
            }),
            Some(MockEvaluation::ServiceDown) | None => Err(service_down()),
        }
    }

    async fn freeform(&self, prompt: &str) -> Result<String, ScoringError> {
        self.freeform_prompts.lock().unwrap().push(prompt.to_string());
        match &self.freeform {
            MockFreeform::Text(text) => Ok(text.clone()),
            MockFreeform::ServiceDown => Err(service_down()),
        }
    }
}
