//! Resume pipeline — model-first, heuristic-fallback orchestration.
//!
//! Flow per request: normalize (caller), then each strategy in order, each
//! bounded by `model_timeout`. Any `ModelError` moves on to the next one; the
//! heuristic strategy at the end of the chain never fails. The model is not
//! retried and the pipeline holds no mutable state.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::errors::ModelError;
use crate::llm_client::repair::strip_boundary_fences;
use crate::llm_client::{CompletionModel, ResponseShape};
use crate::models::{GradeReport, ResumeDraft, Suggestion};
use crate::resume::grading::{heuristic_grade, Grader, HeuristicGrader, ModelGrader};
use crate::resume::prompts::{fill_template, GENERATION_PROMPT_TEMPLATE};
use crate::resume::renderer::render_resume;
use crate::resume::suggestions::{
    apply_heuristically, AppliedSuggestions, HeuristicApplier, ModelApplier, SuggestionApplier,
};

#[derive(Clone)]
pub struct ResumePipeline {
    model: Option<Arc<dyn CompletionModel>>,
    /// Tried in order; the heuristic strategy is always last.
    graders: Vec<Arc<dyn Grader>>,
    appliers: Vec<Arc<dyn SuggestionApplier>>,
    model_timeout: Duration,
}

impl ResumePipeline {
    /// `model = None` makes every operation take its heuristic path.
    pub fn new(model: Option<Arc<dyn CompletionModel>>, model_timeout: Duration) -> Self {
        let mut graders: Vec<Arc<dyn Grader>> = Vec::new();
        let mut appliers: Vec<Arc<dyn SuggestionApplier>> = Vec::new();
        if let Some(model) = &model {
            graders.push(Arc::new(ModelGrader::new(model.clone())));
            appliers.push(Arc::new(ModelApplier::new(model.clone())));
        }
        graders.push(Arc::new(HeuristicGrader));
        appliers.push(Arc::new(HeuristicApplier));

        Self {
            model,
            graders,
            appliers,
            model_timeout,
        }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Produces an HTML rendition: the model's, or the deterministic renderer's.
    pub async fn generate(&self, draft: &ResumeDraft) -> String {
        match self.generate_with_model(draft).await {
            Ok(html) => html,
            Err(ModelError::Unconfigured) => render_resume(draft),
            Err(e) => {
                warn!("Model generation failed, falling back to template: {e}");
                render_resume(draft)
            }
        }
    }

    async fn generate_with_model(&self, draft: &ResumeDraft) -> Result<String, ModelError> {
        let model = self.model.as_ref().ok_or(ModelError::Unconfigured)?;
        let resume_json = serde_json::to_string_pretty(draft)?;
        let prompt = fill_template(GENERATION_PROMPT_TEMPLATE, &[("resume_json", resume_json.as_str())]);

        let text = self
            .bounded(async {
                model
                    .complete(&prompt, ResponseShape::Text)
                    .await
                    .map_err(ModelError::from)
            })
            .await?;

        let html = strip_boundary_fences(text.trim());
        if html.is_empty() {
            return Err(ModelError::Malformed("empty document".to_string()));
        }
        Ok(html.to_string())
    }

    /// Grades the draft. Never fails.
    pub async fn grade(&self, draft: &ResumeDraft, document: Option<&str>) -> GradeReport {
        for grader in &self.graders {
            match self.bounded(grader.grade(draft, document)).await {
                Ok(report) => {
                    info!(
                        "Graded resume via {}: overall={}",
                        grader.backend(),
                        report.overall_score
                    );
                    return report;
                }
                Err(e) => warn!(
                    "Grading via {} failed, falling back to heuristic scoring: {e}",
                    grader.backend()
                ),
            }
        }
        heuristic_grade(draft)
    }

    /// Applies suggestions to the draft. Never fails; the plan is never empty.
    ///
    /// An empty suggestion list skips the model entirely.
    pub async fn apply_suggestions(
        &self,
        draft: &ResumeDraft,
        suggestions: &[Suggestion],
    ) -> AppliedSuggestions {
        if suggestions.is_empty() {
            return apply_heuristically(draft, suggestions);
        }

        for applier in &self.appliers {
            match self.bounded(applier.apply(draft, suggestions)).await {
                Ok(applied) => {
                    info!(
                        "Applied {} suggestions via {}: plan_items={}",
                        suggestions.len(),
                        applier.backend(),
                        applied.action_plan.len()
                    );
                    return applied;
                }
                Err(e) => warn!(
                    "Apply-suggestions via {} failed, falling back to heuristic improvements: {e}",
                    applier.backend()
                ),
            }
        }
        apply_heuristically(draft, suggestions)
    }

    /// Bounds a model-path future by the configured timeout.
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, ModelError>>,
    ) -> Result<T, ModelError> {
        tokio::time::timeout(self.model_timeout, fut)
            .await
            .map_err(|_| ModelError::Timeout(self.model_timeout))?
    }
}
