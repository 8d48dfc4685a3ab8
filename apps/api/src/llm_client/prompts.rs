// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that keeps reviewers on the document they were given.
pub const EVIDENCE_INSTRUCTION: &str = "\
    Base every remark on text that actually appears in the CV. \
    Do NOT invent employers, degrees, dates or skills. \
    If a section is missing or empty, say so plainly and score it accordingly.";
