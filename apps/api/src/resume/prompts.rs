// All LLM prompt templates for the resume pipeline.
// System prompts come from llm_client::prompts, chosen by ResponseShape.
// Fill templates with `fill_template`; substituted values are never rescanned.

/// HTML generation prompt. Replace `{resume_json}` before sending.
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"Using the following JSON resume data, craft a modern, ATS-friendly resume as clean HTML without <html> or <body> tags. Use a single-column layout with bold section headings and bullet lists. Focus on clarity, quantified achievements, and consistent tense.

Resume JSON:
{resume_json}
"#;

/// Grading prompt. Replace `{resume_json}` and `{resume_html}` before sending.
pub const GRADING_PROMPT_TEMPLATE: &str = r#"You are acting as both an Applicant Tracking System (ATS) analyst and senior career coach. Given the raw resume JSON and the rendered HTML version, return a JSON object with the following EXACT keys:

{
  "overallScore": 0,
  "atsScore": 0,
  "contentScore": 0,
  "designScore": 0,
  "completenessScore": 0,
  "suggestions": [
    {"priority": "High|Medium|Low", "type": "string", "detail": "string", "example": "string or null"}
  ]
}

Every score is an integer from 0 to 100. Provide actionable, concise suggestions.

Raw JSON:
{resume_json}

Rendered HTML:
{resume_html}
"#;

/// Apply-suggestions prompt. Replace `{resume_json}` and `{suggestions_json}` before sending.
pub const APPLY_PROMPT_TEMPLATE: &str = r#"You are an expert technical resume editor. You will be given the current resume JSON data and a list of improvement suggestions. Incorporate the suggestions directly into the resume content (rewrite bullets, add keywords, update targetRole, etc.) while keeping the original schema: personalInfo, education[], skills[], experience[], projects[], achievements, extracurriculars, targetRole.

Respond with STRICT JSON using this shape:

{
  "updatedResume": { ... },
  "actionPlan": [
    {"priority": "High|Medium|Low", "task": "", "example": "optional"}
  ]
}

Only include fields that exist in the original resume structure. Preserve arrays and strings. Be concise but specific in your edits.

Resume JSON:
{resume_json}

Suggestions:
{suggestions_json}
"#;

/// Substitutes `{name}` placeholders in a single left-to-right pass over the
/// template. Unknown `{...}` sequences are copied through unchanged.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        filled.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values.iter().find(|(name, _)| {
            tail.strip_prefix(*name)
                .is_some_and(|after| after.starts_with('}'))
        });
        match hit {
            Some((name, value)) => {
                filled.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                filled.push('{');
                rest = tail;
            }
        }
    }
    filled.push_str(rest);
    filled
}
