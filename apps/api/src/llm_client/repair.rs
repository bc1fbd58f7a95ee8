//! Lenient extraction of a JSON value from free-text model output.
//!
//! Models wrap JSON in markdown fences inconsistently. This module strips
//! fences and retries once. It never guesses: prose before the JSON value
//! ("Sure! {...}") is not recovered, and a failed parse yields `None`
//! rather than a partial value.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

/// Opening fence with an optional language tag, e.g. "```json\n".
static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[a-zA-Z]*\s*").expect("fence regex is valid"));

/// Any fence marker anywhere in the text.
static FENCE_ANY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[a-zA-Z]*\s*").expect("fence regex is valid"));

/// Parses model output into a JSON value, or returns `None`.
pub fn repair_json(raw: Option<&str>) -> Option<Value> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }

    let cleaned = strip_boundary_fences(text);
    if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
        return Some(value);
    }

    let sanitized = FENCE_ANY.replace_all(cleaned, "").replace('\0', "");
    match serde_json::from_str::<Value>(sanitized.trim()) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to parse JSON payload from model output: {e}");
            None
        }
    }
}

/// Strips a leading fence (with language tag) and a trailing fence.
pub(crate) fn strip_boundary_fences(text: &str) -> &str {
    if !text.starts_with("```") {
        return text;
    }
    let body = match FENCE_OPEN.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
