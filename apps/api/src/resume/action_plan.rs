//! Action Plan Normalizer — coerces arbitrary plan-like output into an `ActionPlan`.

use serde_json::Value;

use crate::models::suggestion::first_text;
use crate::models::{ActionPlan, ActionPlanItem, Priority, Suggestion};

/// Maps a candidate plan (strings, partial objects, or anything else) to
/// canonical items. When nothing usable remains, one item is synthesized per
/// fallback suggestion with a non-empty detail. Never fails; the result is
/// empty only when both inputs are.
pub fn normalize_action_plan(candidate: &Value, fallback: &[Suggestion]) -> ActionPlan {
    let mut plan: ActionPlan = candidate
        .as_array()
        .map(|items| items.iter().filter_map(item_from_value).collect())
        .unwrap_or_default();

    if plan.is_empty() {
        plan = fallback.iter().filter_map(item_from_suggestion).collect();
    }

    plan
}

fn item_from_value(value: &Value) -> Option<ActionPlanItem> {
    match value {
        Value::String(s) => {
            let task = s.trim();
            (!task.is_empty()).then(|| ActionPlanItem {
                priority: Priority::Medium,
                task: task.to_string(),
                example: None,
            })
        }
        Value::Object(obj) => Some(ActionPlanItem {
            priority: Priority::parse_lenient(obj.get("priority")),
            task: first_text(obj, &["task", "detail"])?,
            example: first_text(obj, &["example"]),
        }),
        _ => None,
    }
}

pub(crate) fn item_from_suggestion(suggestion: &Suggestion) -> Option<ActionPlanItem> {
    let task = suggestion.detail.trim();
    if task.is_empty() {
        return None;
    }
    Some(ActionPlanItem {
        priority: suggestion.priority,
        task: task.to_string(),
        example: suggestion.example.clone().filter(|e| !e.trim().is_empty()),
    })
}
