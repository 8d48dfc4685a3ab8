// Scoring prompt templates.
// All prompts sent through the ScoringClient are defined here.

/// Per-dimension evaluation prompt. `{dimension}` is the dimension's prompt label.
pub const EVALUATION_PROMPT_TEMPLATE: &str =
    "Evaluate the {dimension} of this CV. Give feedback and a score from 0 to 10: {cv_text}";

/// Sent alongside every `score` call so the model answers in the shape `validate_evaluation` expects.
pub const SCORE_SYSTEM: &str = "\
You are an experienced technical recruiter reviewing a CV. \
Return exactly this structure: {\"feedback\": \"string\", \"score\": integer}. \
\"feedback\" is detailed, actionable feedback. \
\"score\" is a whole number from 0 (unusable) to 10 (excellent).";

/// Improvement request built by the aggregator when the average falls below the threshold.
pub const IMPROVEMENT_PROMPT_TEMPLATE: &str = r#"The following CV scored low ({average_score}/10).
Give improvement suggestions based on feedback below:

Overall: {overall_feedback}
Education: {education_feedback}
Skills: {skills_feedback}"#;

pub const IMPROVEMENT_SYSTEM: &str = "\
You are a career coach helping a candidate improve their CV. \
Answer in plain prose or short bullet points. \
Prioritise the changes with the largest impact first.";
