//! Suggestion Applier — folds accepted suggestions into a draft and derives an action plan.
//!
//! `ModelApplier` asks the model to rewrite the draft. `HeuristicApplier`
//! classifies each suggestion by keywords in its detail, first match wins:
//!
//! 1. "keyword" / "ats"   → merge extracted keywords into skills
//! 2. "quant"             → add a quantified bullet to the first experience
//! 3. "summary" / "profile" → update the target role
//! 4. "project" + example → extend the first project's description
//! 5. anything else       → add the suggestion as an experience bullet
//!
//! Matching is English-only and order-sensitive.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::errors::ModelError;
use crate::llm_client::repair::repair_json;
use crate::llm_client::{CompletionModel, ResponseShape};
use crate::models::{ActionPlan, ActionPlanItem, Priority, ResumeDraft, Suggestion};
use crate::resume::action_plan::normalize_action_plan;
use crate::resume::keywords::extract_keywords;
use crate::resume::normalizer::normalize_draft;
use crate::resume::prompts::{fill_template, APPLY_PROMPT_TEMPLATE};

const EMPTY_INPUT_TASK: &str = "Review AI feedback manually and adjust each section of your resume.";
const NOTHING_APPLIED_TASK: &str = "Review AI feedback and update the resume sections accordingly.";
const SAMPLE_QUANTIFIED_BULLET: &str = "Quantify the outcome of your work (e.g., \"Increased API throughput by 35% by optimising caching layers\").";

const RESUME_KEYS: [&str; 3] = ["updatedResume", "resume", "data"];
const PLAN_KEYS: [&str; 3] = ["actionPlan", "aiChecklist", "revisionSteps"];

/// Result of applying suggestions: a new canonical draft and the plan to show the user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedSuggestions {
    pub improved_data: ResumeDraft,
    pub action_plan: ActionPlan,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait SuggestionApplier: Send + Sync {
    async fn apply(
        &self,
        draft: &ResumeDraft,
        suggestions: &[Suggestion],
    ) -> Result<AppliedSuggestions, ModelError>;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// ModelApplier
// ────────────────────────────────────────────────────────────────────────────

pub struct ModelApplier {
    model: Arc<dyn CompletionModel>,
}

impl ModelApplier {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl SuggestionApplier for ModelApplier {
    async fn apply(
        &self,
        draft: &ResumeDraft,
        suggestions: &[Suggestion],
    ) -> Result<AppliedSuggestions, ModelError> {
        let resume_json = serde_json::to_string_pretty(draft)?;
        let suggestions_json = serde_json::to_string_pretty(suggestions)?;
        let prompt = fill_template(
            APPLY_PROMPT_TEMPLATE,
            &[
                ("resume_json", resume_json.as_str()),
                ("suggestions_json", suggestions_json.as_str()),
            ],
        );

        let raw = self.model.complete(&prompt, ResponseShape::Json).await?;
        let parsed = repair_json(Some(&raw)).ok_or(ModelError::Unparseable)?;
        applied_from_model(&parsed, suggestions)
    }

    fn backend(&self) -> &'static str {
        "model"
    }
}

/// Accepts the first object found under any resume key and re-normalizes it.
/// The plan falls back to the suggestions themselves when the model gave none.
pub(crate) fn applied_from_model(
    parsed: &Value,
    suggestions: &[Suggestion],
) -> Result<AppliedSuggestions, ModelError> {
    let obj = parsed
        .as_object()
        .ok_or_else(|| ModelError::Malformed("response is not a JSON object".to_string()))?;

    let candidate = RESUME_KEYS
        .iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| v.is_object())
        .ok_or_else(|| ModelError::Malformed("no updated resume object".to_string()))?;

    let plan = PLAN_KEYS
        .iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
        .unwrap_or(&Value::Null);

    let mut action_plan = normalize_action_plan(plan, suggestions);
    if action_plan.is_empty() {
        action_plan.push(action(Priority::Medium, NOTHING_APPLIED_TASK, None));
    }

    Ok(AppliedSuggestions {
        improved_data: normalize_draft(candidate),
        action_plan,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicApplier
// ────────────────────────────────────────────────────────────────────────────

/// Rule-based applier. Never fails and always returns a non-empty plan.
pub struct HeuristicApplier;

#[async_trait]
impl SuggestionApplier for HeuristicApplier {
    async fn apply(
        &self,
        draft: &ResumeDraft,
        suggestions: &[Suggestion],
    ) -> Result<AppliedSuggestions, ModelError> {
        Ok(apply_heuristically(draft, suggestions))
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

pub fn apply_heuristically(draft: &ResumeDraft, suggestions: &[Suggestion]) -> AppliedSuggestions {
    let mut improved = draft.clone();
    let mut plan = ActionPlan::new();

    if suggestions.is_empty() {
        plan.push(action(Priority::Medium, EMPTY_INPUT_TASK, None));
        return AppliedSuggestions {
            improved_data: improved,
            action_plan: plan,
        };
    }

    for suggestion in suggestions {
        if let Some(item) = apply_one(&mut improved, suggestion) {
            plan.push(item);
        }
    }

    if plan.is_empty() {
        plan.push(action(Priority::Medium, NOTHING_APPLIED_TASK, None));
    }

    AppliedSuggestions {
        improved_data: improved,
        action_plan: plan,
    }
}

/// Applies a single suggestion and returns the action item it produced, if any.
fn apply_one(draft: &mut ResumeDraft, suggestion: &Suggestion) -> Option<ActionPlanItem> {
    let detail = suggestion.detail.trim();
    let example = suggestion
        .example
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());
    let priority = suggestion.priority;
    let lower = detail.to_lowercase();

    if lower.contains("keyword") || lower.contains("ats") {
        let keywords = extract_keywords(suggestion);
        if keywords.is_empty() {
            return (!detail.is_empty()).then(|| action(priority, detail, example));
        }
        for keyword in &keywords {
            draft.push_skill(keyword);
        }
        let task = format!(
            "Blend these ATS keywords into experience and skills: {}",
            keywords.join(", ")
        );
        return Some(action(priority, &task, example));
    }

    if lower.contains("quant") {
        if let Some(first) = draft.experience.first_mut() {
            first.push_bullet(example.unwrap_or(SAMPLE_QUANTIFIED_BULLET));
        }
        return Some(action(priority, detail, example));
    }

    if lower.contains("summary") || lower.contains("profile") {
        if let Some(example) = example {
            draft.target_role = example.to_string();
        } else if draft.target_role.trim().is_empty() {
            draft.target_role = detail.to_string();
        }
        return Some(action(priority, detail, example));
    }

    if lower.contains("project") {
        if let Some(example) = example {
            if let Some(first) = draft.projects.first_mut() {
                first.description = [first.description.trim(), example]
                    .into_iter()
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n");
            }
            return Some(action(priority, detail, Some(example)));
        }
    }

    if detail.is_empty() {
        return None;
    }

    let bullet = example
        .map(String::from)
        .unwrap_or_else(|| format!("AI Suggestion: {detail}"));
    if let Some(first) = draft.experience.first_mut() {
        first.push_bullet(&bullet);
    }
    Some(action(priority, detail, example))
}

fn action(priority: Priority, task: &str, example: Option<&str>) -> ActionPlanItem {
    ActionPlanItem {
        priority,
        task: task.to_string(),
        example: example.map(String::from),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::testing::CannedModel;
    use serde_json::json;

    fn base_draft() -> ResumeDraft {
        normalize_draft(&json!({
            "personalInfo": {"name": "Alex"},
            "skills": ["Rust", "Kubernetes"],
            "experience": [{"company": "Acme", "description": ["Built the billing service"]}],
            "projects": [{"title": "Grader", "description": "Grades resumes"}]
        }))
    }

    fn suggestion(priority: Priority, detail: &str, example: Option<&str>) -> Suggestion {
        Suggestion {
            priority,
            category: "General".to_string(),
            detail: detail.to_string(),
            example: example.map(String::from),
        }
    }

    #[test]
    fn test_empty_suggestions_yield_single_review_item() {
        let draft = base_draft();
        let result = apply_heuristically(&draft, &[]);
        assert_eq!(result.improved_data, draft);
        assert_eq!(result.action_plan.len(), 1);
        assert!(result.action_plan[0].task.starts_with("Review AI feedback manually"));
    }

    #[test]
    fn test_quantified_suggestion_scenario_c() {
        let s = suggestion(
            Priority::High,
            "Add more quantified achievements",
            Some("Cut latency by 40%"),
        );
        let result = apply_heuristically(&base_draft(), &[s]);
        let bullets = &result.improved_data.experience[0].description;
        assert_eq!(bullets.last().map(String::as_str), Some("Cut latency by 40%"));
        assert_eq!(bullets.len(), 2);
        assert_eq!(result.action_plan.len(), 1);
        assert_eq!(result.action_plan[0].priority, Priority::High);
    }

    #[test]
    fn test_quantified_without_example_uses_sample_bullet() {
        let s = suggestion(Priority::Medium, "Quantify impact", None);
        let result = apply_heuristically(&normalize_draft(&json!({})), &[s]);
        assert_eq!(
            result.improved_data.experience[0].description,
            vec![SAMPLE_QUANTIFIED_BULLET.to_string()]
        );
    }

    #[test]
    fn test_keyword_suggestion_scenario_d() {
        let s = suggestion(Priority::Medium, "Include ATS keywords: Kubernetes, Terraform", None);
        let result = apply_heuristically(&base_draft(), &[s]);
        assert_eq!(result.improved_data.skills, vec!["Rust", "Kubernetes", "Terraform"]);
        assert_eq!(
            result.action_plan[0].task,
            "Blend these ATS keywords into experience and skills: Kubernetes, Terraform"
        );
    }

    #[test]
    fn test_keyword_suggestion_is_idempotent_on_skills() {
        let s = suggestion(Priority::Medium, "Add keywords: Docker; Helm", None);
        let once = apply_heuristically(&base_draft(), std::slice::from_ref(&s));
        let twice = apply_heuristically(&once.improved_data, &[s]);
        assert_eq!(once.improved_data.skills, twice.improved_data.skills);
    }

    #[test]
    fn test_summary_suggestion_sets_target_role() {
        let with_example = suggestion(Priority::Low, "Tighten your summary", Some("Backend Engineer"));
        let result = apply_heuristically(&base_draft(), &[with_example]);
        assert_eq!(result.improved_data.target_role, "Backend Engineer");

        let mut draft = base_draft();
        draft.target_role = "Data Engineer".to_string();
        let without_example = suggestion(Priority::Low, "Refine profile statement", None);
        let result = apply_heuristically(&draft, &[without_example.clone()]);
        assert_eq!(result.improved_data.target_role, "Data Engineer");

        let result = apply_heuristically(&base_draft(), &[without_example]);
        assert_eq!(result.improved_data.target_role, "Refine profile statement");
    }

    #[test]
    fn test_project_suggestion_appends_example() {
        let s = suggestion(Priority::Medium, "Expand the project outcomes", Some("Used by 200 students"));
        let result = apply_heuristically(&base_draft(), &[s]);
        assert_eq!(
            result.improved_data.projects[0].description,
            "Grades resumes\nUsed by 200 students"
        );
        assert_eq!(result.improved_data.experience, base_draft().experience);
    }

    #[test]
    fn test_project_without_example_falls_through_to_bullet() {
        let s = suggestion(Priority::Medium, "Describe project impact", None);
        let result = apply_heuristically(&base_draft(), &[s]);
        assert_eq!(
            result.improved_data.experience[0].description.last().map(String::as_str),
            Some("AI Suggestion: Describe project impact")
        );
    }

    #[test]
    fn test_generic_suggestion_prefers_example() {
        let s = suggestion(Priority::Low, "Use stronger verbs", Some("Led migration to Postgres"));
        let result = apply_heuristically(&base_draft(), &[s]);
        assert_eq!(
            result.improved_data.experience[0].description.last().map(String::as_str),
            Some("Led migration to Postgres")
        );
        assert_eq!(result.action_plan[0].task, "Use stronger verbs");
    }

    #[test]
    fn test_blank_suggestion_changes_nothing() {
        let draft = base_draft();
        let s = suggestion(Priority::High, "   ", Some("ignored"));
        let result = apply_heuristically(&draft, &[s]);
        assert_eq!(result.improved_data, draft);
        assert_eq!(result.action_plan.len(), 1);
        assert_eq!(result.action_plan[0].task, NOTHING_APPLIED_TASK);
    }

    #[test]
    fn test_input_draft_is_not_mutated() {
        let draft = base_draft();
        let s = suggestion(Priority::High, "Quantify wins", Some("Saved $10k"));
        let _ = apply_heuristically(&draft, &[s]);
        assert_eq!(draft, base_draft());
    }

    #[test]
    fn test_applied_from_model_accepts_alternate_keys() {
        let parsed = json!({
            "resume": {"skills": ["Go", "Go"], "experience": []},
            "aiChecklist": ["Proofread", {"task": "Add metrics", "priority": "High"}]
        });
        let applied = applied_from_model(&parsed, &[]).unwrap();
        assert_eq!(applied.improved_data.skills, vec!["Go"]);
        assert_eq!(applied.improved_data.experience.len(), 1);
        assert_eq!(applied.action_plan.len(), 2);
        assert_eq!(applied.action_plan[1].priority, Priority::High);
    }

    #[test]
    fn test_applied_from_model_uses_suggestions_when_plan_missing() {
        let s = suggestion(Priority::High, "Add metrics", None);
        let applied = applied_from_model(&json!({"updatedResume": {}}), &[s]).unwrap();
        assert_eq!(applied.action_plan.len(), 1);
        assert_eq!(applied.action_plan[0].task, "Add metrics");
    }

    #[test]
    fn test_applied_from_model_requires_resume_object() {
        assert!(matches!(
            applied_from_model(&json!({"updatedResume": "text", "actionPlan": []}), &[]),
            Err(ModelError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_model_applier_round_trip() {
        let model = Arc::new(CannedModel::replying(
            r#"{"updatedResume": {"targetRole": "SRE"}, "actionPlan": [{"task": "Done", "priority": "Low"}]}"#,
        ));
        let applier = ModelApplier::new(model.clone());
        let s = suggestion(Priority::High, "Rewrite summary", None);
        let applied = applier.apply(&base_draft(), &[s]).await.unwrap();
        assert_eq!(applied.improved_data.target_role, "SRE");
        assert_eq!(applied.action_plan[0].priority, Priority::Low);

        let prompt = model.last_prompt().unwrap();
        assert!(prompt.contains("Rewrite summary"));
        assert!(prompt.contains("updatedResume"));
    }

    #[tokio::test]
    async fn test_model_applier_prompt_keeps_placeholder_text_from_draft() {
        let model = Arc::new(CannedModel::replying(r#"{"updatedResume": {}}"#));
        let applier = ModelApplier::new(model.clone());
        let mut draft = base_draft();
        draft.target_role = "Engineer {suggestions_json}".to_string();
        let s = suggestion(Priority::Medium, "Tighten wording", None);
        applier.apply(&draft, &[s]).await.unwrap();

        let prompt = model.last_prompt().unwrap();
        assert!(prompt.contains("Engineer {suggestions_json}"));
        assert_eq!(prompt.matches("Tighten wording").count(), 1);
    }
}
