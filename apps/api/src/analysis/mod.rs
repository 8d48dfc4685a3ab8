// CV analysis API: upload → extraction → evaluation workflow → report.
// All model calls happen inside the workflow, through the ScoringClient.

pub mod handlers;
