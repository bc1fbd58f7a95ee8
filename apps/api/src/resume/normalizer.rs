//! Canonical Draft Normalizer — coerces any JSON value into a fully-shaped `ResumeDraft`.
//!
//! This never fails. Wrong types become defaults, null entries are dropped,
//! and empty sequences get exactly one placeholder entry, so nothing
//! downstream needs to ask whether a field is missing.

use serde_json::{Map, Value};

use crate::models::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDraft};

/// Builds a canonical draft from an arbitrary, untrusted value.
pub fn normalize_draft(input: &Value) -> ResumeDraft {
    let empty = Map::new();
    let root = input.as_object().unwrap_or(&empty);

    let personal_info = root
        .get("personalInfo")
        .and_then(Value::as_object)
        .map(personal_info_from)
        .unwrap_or_default();

    let education = entries_or_placeholder(root.get("education"), education_from);
    let experience = entries_or_placeholder(root.get("experience"), experience_from);
    let projects = entries_or_placeholder(root.get("projects"), project_from);

    let mut draft = ResumeDraft {
        personal_info,
        education,
        skills: Vec::new(),
        experience,
        projects,
        achievements: text(root.get("achievements")),
        extracurriculars: text(root.get("extracurriculars")),
        target_role: text(root.get("targetRole")),
    };

    if let Some(skills) = root.get("skills").and_then(Value::as_array) {
        for skill in skills.iter().filter_map(Value::as_str) {
            draft.push_skill(skill);
        }
    }

    draft
}

/// Coerces a scalar into a string field. Strings pass through, numbers and
/// booleans are stringified, everything else is empty.
pub(crate) fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn entries_or_placeholder<T: Default>(
    value: Option<&Value>,
    build: fn(&Map<String, Value>) -> T,
) -> Vec<T> {
    let entries: Vec<T> = value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| match item.as_object() {
                    Some(obj) => build(obj),
                    None => T::default(),
                })
                .collect()
        })
        .unwrap_or_default();

    if entries.is_empty() {
        vec![T::default()]
    } else {
        entries
    }
}

fn personal_info_from(obj: &Map<String, Value>) -> PersonalInfo {
    PersonalInfo {
        name: text(obj.get("name")),
        email: text(obj.get("email")),
        phone: text(obj.get("phone")),
        linkedin: text(obj.get("linkedin")),
        github: text(obj.get("github")),
        portfolio: text(obj.get("portfolio")),
    }
}

fn education_from(obj: &Map<String, Value>) -> EducationEntry {
    EducationEntry {
        college: text(obj.get("college")),
        degree: text(obj.get("degree")),
        cgpa: text(obj.get("cgpa")),
        year: text(obj.get("year")),
        coursework: text(obj.get("coursework")),
    }
}

fn experience_from(obj: &Map<String, Value>) -> ExperienceEntry {
    ExperienceEntry {
        company: text(obj.get("company")),
        role: text(obj.get("role")),
        duration: text(obj.get("duration")),
        description: description_from(obj.get("description")),
    }
}

fn description_from(value: Option<&Value>) -> Vec<String> {
    let bullets: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    };

    if bullets.is_empty() {
        vec![String::new()]
    } else {
        bullets
    }
}

fn project_from(obj: &Map<String, Value>) -> ProjectEntry {
    let link = match text(obj.get("githubLink")) {
        s if s.is_empty() => text(obj.get("github")),
        s => s,
    };
    ProjectEntry {
        title: text(obj.get("title")),
        technologies: text(obj.get("technologies")),
        description: text(obj.get("description")),
        github_link: link,
    }
}
