use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Importance of a suggestion or action item. Unknown labels read as Medium.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Lenient parse: case-insensitive, anything unrecognised is Medium.
    pub fn parse_lenient(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str).map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "high" => Priority::High,
            Some(s) if s == "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

/// A single improvement suggestion, either produced by grading or supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub priority: Priority,
    #[serde(rename = "type")]
    pub category: String,
    pub detail: String,
    pub example: Option<String>,
}

impl Suggestion {
    /// Reads a suggestion out of an untrusted JSON value.
    ///
    /// Accepts `text` for `detail` and `area`/`category` for `type`.
    /// Returns `None` for anything that is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let category = first_text(obj, &["type", "area", "category"]).unwrap_or_default();
        let detail = first_text(obj, &["detail", "text"]).unwrap_or_default();

        Some(Suggestion {
            priority: Priority::parse_lenient(obj.get("priority")),
            category,
            detail,
            example: first_text(obj, &["example"]),
        })
    }

    /// Decodes a list of untrusted suggestion values, skipping non-objects.
    pub fn from_values(values: &[Value]) -> Vec<Self> {
        values.iter().filter_map(Suggestion::from_value).collect()
    }
}

/// First non-blank string among `keys`, trimmed.
pub(crate) fn first_text(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(String::from)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlanItem {
    pub priority: Priority,
    pub task: String,
    pub example: Option<String>,
}

pub type ActionPlan = Vec<ActionPlanItem>;

/// Grade of a resume draft. All scores are integers in 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub overall_score: u32,
    pub ats_score: u32,
    pub content_score: u32,
    pub design_score: u32,
    pub completeness_score: u32,
    pub suggestions: Vec<Suggestion>,
}
