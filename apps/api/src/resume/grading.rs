//! Grading Engine — pluggable, trait-based graders for a canonical draft.
//!
//! `ModelGrader` asks the configured model for a JSON grade and coerces it
//! leniently. `HeuristicGrader` scores the draft's shape and never fails.
//! The pipeline tries the model first and falls back on any `ModelError`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::ModelError;
use crate::llm_client::repair::repair_json;
use crate::llm_client::{CompletionModel, ResponseShape};
use crate::models::{GradeReport, Priority, ResumeDraft, Suggestion};
use crate::resume::prompts::{fill_template, GRADING_PROMPT_TEMPLATE};
use crate::resume::renderer::render_resume;

const MAX_SCORE: u32 = 100;
const HEURISTIC_DESIGN_SCORE: u32 = 70;
const MISSING_DETAIL: &str = "No suggestion provided.";

/// (top-level key, key inside `categoryScores`)
const ATS_KEYS: (&str, &str) = ("atsScore", "atsCompatibility");
const CONTENT_KEYS: (&str, &str) = ("contentScore", "contentQuality");
const DESIGN_KEYS: (&str, &str) = ("designScore", "formattingDesign");
const COMPLETENESS_KEYS: (&str, &str) = ("completenessScore", "completeness");

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The grader trait. Implement this to swap backends without touching the
/// pipeline or the handlers.
#[async_trait]
pub trait Grader: Send + Sync {
    async fn grade(
        &self,
        draft: &ResumeDraft,
        document: Option<&str>,
    ) -> Result<GradeReport, ModelError>;

    /// Short label for logs: "model" | "heuristic".
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// ModelGrader
// ────────────────────────────────────────────────────────────────────────────

pub struct ModelGrader {
    model: Arc<dyn CompletionModel>,
}

impl ModelGrader {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl Grader for ModelGrader {
    async fn grade(
        &self,
        draft: &ResumeDraft,
        document: Option<&str>,
    ) -> Result<GradeReport, ModelError> {
        let prompt = build_grading_prompt(draft, document)?;
        let raw = self.model.complete(&prompt, ResponseShape::Json).await?;
        let parsed = repair_json(Some(&raw)).ok_or(ModelError::Unparseable)?;
        report_from_model(&parsed)
    }

    fn backend(&self) -> &'static str {
        "model"
    }
}

fn build_grading_prompt(draft: &ResumeDraft, document: Option<&str>) -> Result<String, ModelError> {
    let resume_json = serde_json::to_string_pretty(draft)?;
    let resume_html = match document {
        Some(doc) if !doc.trim().is_empty() => doc.to_string(),
        _ => render_resume(draft),
    };

    Ok(fill_template(
        GRADING_PROMPT_TEMPLATE,
        &[
            ("resume_json", resume_json.as_str()),
            ("resume_html", resume_html.as_str()),
        ],
    ))
}

/// Coerces a parsed model response into a report.
///
/// Scores come from top-level keys or the nested `categoryScores` object,
/// default to 0, and are clamped to 0..=100. A response with no score key
/// and no suggestion list is rejected as malformed.
pub(crate) fn report_from_model(parsed: &Value) -> Result<GradeReport, ModelError> {
    let obj = parsed
        .as_object()
        .ok_or_else(|| ModelError::Malformed("grade is not a JSON object".to_string()))?;
    let empty = Map::new();
    let nested = obj
        .get("categoryScores")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let has_scores = [ATS_KEYS, CONTENT_KEYS, DESIGN_KEYS, COMPLETENESS_KEYS]
        .iter()
        .any(|(top, inner)| obj.contains_key(*top) || nested.contains_key(*inner))
        || obj.contains_key("overallScore");
    let raw_suggestions = obj.get("suggestions").and_then(Value::as_array);

    if !has_scores && raw_suggestions.is_none() {
        return Err(ModelError::Malformed(
            "no score keys and no suggestions".to_string(),
        ));
    }

    let pick = |(top, inner): (&str, &str)| {
        coerce_score(obj.get(top))
            .filter(|s| *s > 0)
            .or_else(|| coerce_score(nested.get(inner)))
            .unwrap_or(0)
    };

    let ats_score = pick(ATS_KEYS);
    let content_score = pick(CONTENT_KEYS);
    let design_score = pick(DESIGN_KEYS);
    let completeness_score = pick(COMPLETENESS_KEYS);

    let overall_score = coerce_score(obj.get("overallScore"))
        .filter(|s| *s > 0)
        .unwrap_or_else(|| {
            rounded_mean(&[ats_score, content_score, design_score, completeness_score])
        });

    let suggestions = raw_suggestions
        .map(|items| items.iter().filter_map(suggestion_from_model).collect())
        .unwrap_or_default();

    Ok(GradeReport {
        overall_score,
        ats_score,
        content_score,
        design_score,
        completeness_score,
        suggestions,
    })
}

/// Accepts numbers and numeric strings; rounds and clamps to 0..=100.
fn coerce_score(value: Option<&Value>) -> Option<u32> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() {
        return None;
    }
    Some(n.round().clamp(0.0, MAX_SCORE as f64) as u32)
}

fn suggestion_from_model(value: &Value) -> Option<Suggestion> {
    let mut suggestion = Suggestion::from_value(value)?;
    if suggestion.category.is_empty() {
        suggestion.category = "General".to_string();
    }
    if suggestion.detail.is_empty() {
        suggestion.detail = MISSING_DETAIL.to_string();
    }
    Some(suggestion)
}

fn rounded_mean(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let sum: u32 = scores.iter().sum();
    (sum as f64 / scores.len() as f64).round() as u32
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicGrader
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic scorer driven only by the draft's shape. Never fails.
///
/// - completeness = 25 × satisfied checks (name, education, experience, skills)
/// - ats = 15 × skills + 25
/// - content = 20 × bullets in the first experience entry + 40
/// - design = 70
///
/// Each capped at 100; overall is the rounded mean. Blank placeholder entries
/// and empty bullets do not count.
pub struct HeuristicGrader;

#[async_trait]
impl Grader for HeuristicGrader {
    async fn grade(
        &self,
        draft: &ResumeDraft,
        _document: Option<&str>,
    ) -> Result<GradeReport, ModelError> {
        Ok(heuristic_grade(draft))
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

pub fn heuristic_grade(draft: &ResumeDraft) -> GradeReport {
    let checks = [
        !draft.personal_info.name.trim().is_empty(),
        draft.filled_education().next().is_some(),
        draft.filled_experience().next().is_some(),
        !draft.skills.is_empty(),
    ];
    let satisfied = checks.iter().filter(|c| **c).count() as u32;

    let completeness_score = (satisfied * 25).min(MAX_SCORE);
    let ats_score = capped(draft.skills.len(), 15, 25);
    let first_bullets = draft
        .experience
        .first()
        .map(|e| e.bullet_count())
        .unwrap_or(0);
    let content_score = capped(first_bullets, 20, 40);
    let design_score = HEURISTIC_DESIGN_SCORE;

    let overall_score =
        rounded_mean(&[completeness_score, ats_score, content_score, design_score]);

    GradeReport {
        overall_score,
        ats_score,
        content_score,
        design_score,
        completeness_score,
        suggestions: default_suggestions(),
    }
}

/// `min(100, count × per_item + base)` without overflow on huge counts.
fn capped(count: usize, per_item: u32, base: u32) -> u32 {
    let count = count.min(MAX_SCORE as usize) as u32;
    (count * per_item + base).min(MAX_SCORE)
}

fn default_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion {
            priority: Priority::High,
            category: "Content Quality".to_string(),
            detail: "Add quantified achievements to the experience section to highlight impact."
                .to_string(),
            example: Some(
                "Increased API throughput by 35% by optimising caching layers.".to_string(),
            ),
        },
        Suggestion {
            priority: Priority::Medium,
            category: "ATS Keywords".to_string(),
            detail: "Include 4-5 keywords from the job description in your skills and experience bullets."
                .to_string(),
            example: None,
        },
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::normalizer::normalize_draft;
    use crate::resume::testing::CannedModel;
    use serde_json::json;

    fn scenario_b_draft() -> ResumeDraft {
        normalize_draft(&json!({
            "personalInfo": {"name": "Alex Johnson"},
            "education": [{"college": "State University"}],
            "skills": ["A", "B", "C"],
            "experience": [{"company": "Acme", "description": ["one", "two"]}]
        }))
    }

    #[test]
    fn test_heuristic_scenario_b() {
        let report = heuristic_grade(&scenario_b_draft());
        assert_eq!(report.completeness_score, 100);
        assert_eq!(report.ats_score, 70);
        assert_eq!(report.content_score, 80);
        assert_eq!(report.design_score, 70);
        assert_eq!(report.overall_score, 80);
        assert!(!report.suggestions.is_empty());
    }

    #[test]
    fn test_heuristic_empty_draft() {
        let report = heuristic_grade(&normalize_draft(&json!({})));
        assert_eq!(report.completeness_score, 0);
        assert_eq!(report.ats_score, 25);
        assert_eq!(report.content_score, 40);
        // (0 + 25 + 40 + 70) / 4 = 33.75
        assert_eq!(report.overall_score, 34);
    }

    #[test]
    fn test_heuristic_scores_are_bounded() {
        let skills: Vec<String> = (0..500).map(|i| format!("skill-{i}")).collect();
        let bullets: Vec<String> = (0..50).map(|i| format!("bullet {i}")).collect();
        let draft = normalize_draft(&json!({
            "personalInfo": {"name": "A"},
            "skills": skills,
            "experience": [{"description": bullets}]
        }));
        let report = heuristic_grade(&draft);
        for score in [
            report.overall_score,
            report.ats_score,
            report.content_score,
            report.design_score,
            report.completeness_score,
        ] {
            assert!(score <= 100, "score {score} out of range");
        }
        assert_eq!(report.ats_score, 100);
        assert_eq!(report.content_score, 100);
    }

    #[test]
    fn test_heuristic_monotonic_in_skills_and_bullets() {
        let mut draft = scenario_b_draft();
        let mut last_ats = heuristic_grade(&draft).ats_score;
        for i in 0..10 {
            draft.push_skill(&format!("extra-{i}"));
            let ats = heuristic_grade(&draft).ats_score;
            assert!(ats >= last_ats);
            last_ats = ats;
        }

        let mut last_content = heuristic_grade(&draft).content_score;
        for i in 0..5 {
            draft.experience[0].push_bullet(&format!("Delivered {i}"));
            let content = heuristic_grade(&draft).content_score;
            assert!(content >= last_content);
            last_content = content;
        }
    }

    #[test]
    fn test_model_report_top_level_scores() {
        let report = report_from_model(&json!({
            "atsScore": 80,
            "contentScore": "70",
            "designScore": 90.4,
            "completenessScore": 60,
            "suggestions": [{"priority": "Low", "type": "Design", "detail": "Use one font"}]
        }))
        .unwrap();
        assert_eq!(report.ats_score, 80);
        assert_eq!(report.content_score, 70);
        assert_eq!(report.design_score, 90);
        assert_eq!(report.completeness_score, 60);
        assert_eq!(report.overall_score, 75);
        assert_eq!(report.suggestions[0].priority, Priority::Low);
    }

    #[test]
    fn test_model_report_nested_category_scores() {
        let report = report_from_model(&json!({
            "overallScore": 91,
            "categoryScores": {
                "atsCompatibility": 88,
                "contentQuality": 92,
                "formattingDesign": 150,
                "completeness": -5
            }
        }))
        .unwrap();
        assert_eq!(report.overall_score, 91);
        assert_eq!(report.ats_score, 88);
        assert_eq!(report.design_score, 100);
        assert_eq!(report.completeness_score, 0);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_model_report_suggestion_defaults() {
        let report = report_from_model(&json!({"suggestions": [{}, "loose"]})).unwrap();
        assert_eq!(report.suggestions.len(), 1);
        let s = &report.suggestions[0];
        assert_eq!(s.priority, Priority::Medium);
        assert_eq!(s.category, "General");
        assert_eq!(s.detail, "No suggestion provided.");
        assert_eq!(s.example, None);
        assert_eq!(report.overall_score, 0);
    }

    #[test]
    fn test_model_report_rejects_unrelated_object() {
        assert!(matches!(
            report_from_model(&json!({"message": "hello"})),
            Err(ModelError::Malformed(_))
        ));
        assert!(matches!(
            report_from_model(&json!([1, 2])),
            Err(ModelError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_model_grader_parses_fenced_output() {
        let model = CannedModel::replying(
            "```json\n{\"overallScore\": 77, \"atsScore\": 70, \"contentScore\": 80, \"designScore\": 75, \"completenessScore\": 85, \"suggestions\": []}\n```",
        );
        let grader = ModelGrader::new(Arc::new(model));
        let report = grader.grade(&scenario_b_draft(), None).await.unwrap();
        assert_eq!(report.overall_score, 77);
        assert_eq!(grader.backend(), "model");
    }

    #[tokio::test]
    async fn test_model_grader_prompt_embeds_draft_and_document() {
        let model = Arc::new(CannedModel::replying("{\"atsScore\": 50}"));
        let grader = ModelGrader::new(model.clone());
        grader
            .grade(&scenario_b_draft(), Some("<article>custom</article>"))
            .await
            .unwrap();
        let prompt = model.last_prompt().unwrap();
        assert!(prompt.contains("\"personalInfo\""));
        assert!(prompt.contains("<article>custom</article>"));
        assert!(prompt.contains("completenessScore"));
    }

    #[tokio::test]
    async fn test_model_grader_prompt_keeps_placeholder_text_from_draft() {
        let model = Arc::new(CannedModel::replying("{\"atsScore\": 50}"));
        let grader = ModelGrader::new(model.clone());
        let mut draft = scenario_b_draft();
        draft.achievements = "Award {resume_html}".to_string();
        grader.grade(&draft, Some("<article>doc</article>")).await.unwrap();
        let prompt = model.last_prompt().unwrap();
        assert!(prompt.contains("Award {resume_html}"));
        assert_eq!(prompt.matches("<article>doc</article>").count(), 1);
    }

    #[tokio::test]
    async fn test_model_grader_errors_on_prose() {
        let grader = ModelGrader::new(Arc::new(CannedModel::replying("I cannot grade this.")));
        assert!(matches!(
            grader.grade(&scenario_b_draft(), None).await,
            Err(ModelError::Unparseable)
        ));
    }

    #[tokio::test]
    async fn test_model_grader_propagates_transport_failure() {
        let grader = ModelGrader::new(Arc::new(CannedModel::failing()));
        assert!(matches!(
            grader.grade(&scenario_b_draft(), None).await,
            Err(ModelError::Unavailable(_))
        ));
    }
}
