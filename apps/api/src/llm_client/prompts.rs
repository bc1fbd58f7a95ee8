// Shared system prompts, selected by `ResponseShape`.
// Task prompts live next to the code that uses them (resume/prompts.rs).

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-text tasks such as rendering a resume as HTML.
pub const TEXT_SYSTEM: &str = "You are an expert technical resume writer. \
    Respond with the requested content only, without commentary.";
