//! Maps a stored student profile document onto a resume draft.
//!
//! The profile shape is the portal's: `personal`, `currentCourse`,
//! `education` (percentages), `workExperience`, `projects`, `skills`,
//! `certificates`, `extracurricular`. Missing sections produce the same
//! placeholders the normalizer would.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::models::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDraft};
use crate::profile::sample::sample_resume;
use crate::resume::normalizer::text;

const DEFAULT_SKILL: &str = "Teamwork";

/// Leading bullet glyphs and whitespace on a description line.
static BULLET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[•\-\s]+").expect("bullet regex is valid"));

/// Returns `None` when there is no profile object to map.
pub fn map_profile_to_draft(profile: &Value, user: Option<&Value>) -> Option<ResumeDraft> {
    let profile = profile.as_object()?;
    let empty = Map::new();
    let user = user.and_then(Value::as_object).unwrap_or(&empty);
    let personal = section(profile, "personal");
    let course = section(profile, "currentCourse");

    let mut education: Vec<EducationEntry> = current_course_entry(profile, course).into_iter().collect();
    if education.is_empty() {
        education.push(EducationEntry::default());
    }

    let mut experience: Vec<ExperienceEntry> = items(profile.get("workExperience"))
        .filter_map(Value::as_object)
        .map(|exp| ExperienceEntry {
            company: text(exp.get("company")),
            role: text(exp.get("role")),
            duration: text(exp.get("duration")),
            description: description_bullets(exp.get("description"), exp.get("technologiesUsed")),
        })
        .collect();
    if experience.is_empty() {
        experience.push(ExperienceEntry::default());
    }

    let mut projects: Vec<ProjectEntry> = items(profile.get("projects"))
        .filter_map(Value::as_object)
        .map(|proj| ProjectEntry {
            title: text(proj.get("title")),
            technologies: text(proj.get("technologies")),
            description: text(proj.get("description")),
            github_link: text(proj.get("url")),
        })
        .collect();
    if projects.is_empty() {
        projects.push(ProjectEntry::default());
    }

    let mut draft = ResumeDraft {
        personal_info: personal_info(personal, user),
        education,
        skills: Vec::new(),
        experience,
        projects,
        achievements: join_texts(
            items(profile.get("certificates")).map(|c| text(c.get("title"))),
        ),
        extracurriculars: extracurriculars(profile, personal),
        target_role: target_role(course),
    };

    let skills = section(profile, "skills");
    for skill in items(skills.get("technical")).chain(items(skills.get("soft"))) {
        draft.push_skill(&text(Some(skill)));
    }
    if draft.skills.is_empty() {
        draft.push_skill(DEFAULT_SKILL);
    }

    Some(draft)
}

fn personal_info(personal: &Map<String, Value>, user: &Map<String, Value>) -> PersonalInfo {
    let full_name = ["firstName", "middleName", "lastName"]
        .iter()
        .map(|k| text(personal.get(*k)))
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let name = match full_name.trim() {
        "" => text(user.get("username")).trim().to_string(),
        name => name.to_string(),
    };

    PersonalInfo {
        name,
        email: text(user.get("email")),
        phone: text(personal.get("contactNumber")),
        linkedin: text(personal.get("linkedIn")),
        github: text(personal.get("github")),
        portfolio: text(personal.get("otherSocialMedia")),
    }
}

fn current_course_entry(
    profile: &Map<String, Value>,
    course: &Map<String, Value>,
) -> Option<EducationEntry> {
    let degree = text(course.get("degree"));
    let branch = text(course.get("branch"));
    let department = text(course.get("department"));
    if degree.is_empty() && branch.is_empty() && department.is_empty() {
        return None;
    }

    let college = if department.is_empty() {
        degree.clone()
    } else {
        department
    };
    let degree_line = [degree.as_str(), branch.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" - ");

    Some(EducationEntry {
        college,
        degree: degree_line,
        cgpa: text(course.get("aggregatePercentage")),
        year: text(course.get("graduationYear")),
        coursework: academic_highlights(section(profile, "education")),
    })
}

/// "10th: 91% | 12th: 88% | Diploma: 75%", skipping absent marks.
fn academic_highlights(education: &Map<String, Value>) -> String {
    [
        ("10th", "tenthPercentage"),
        ("12th", "twelfthPercentage"),
        ("Diploma", "diplomaPercentage"),
    ]
    .iter()
    .filter_map(|(label, key)| {
        let value = text(education.get(*key));
        match value.trim() {
            "" | "0" => None,
            v => Some(format!("{label}: {v}%")),
        }
    })
    .collect::<Vec<_>>()
    .join(" | ")
}

/// A "Tech stack: …" line, then the description as bullets. Never empty.
fn description_bullets(description: Option<&Value>, technologies: Option<&Value>) -> Vec<String> {
    let mut bullets = Vec::new();

    if let Some(Value::Array(techs)) = technologies {
        let line = techs
            .iter()
            .map(|t| text(Some(t)))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if !line.is_empty() {
            bullets.push(format!("Tech stack: {line}"));
        }
    }

    match description {
        Some(Value::Array(lines)) => bullets.extend(
            lines
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        ),
        Some(Value::String(s)) => bullets.extend(
            s.lines()
                .map(|l| BULLET_PREFIX.replace(l, "").trim().to_string())
                .filter(|l| !l.is_empty()),
        ),
        _ => {}
    }

    if bullets.is_empty() {
        bullets.push(String::new());
    }
    bullets
}

fn extracurriculars(profile: &Map<String, Value>, personal: &Map<String, Value>) -> String {
    let activities = join_texts(items(profile.get("extracurricular")).map(|v| text(Some(v))));
    if !activities.is_empty() {
        return activities;
    }
    join_texts(items(personal.get("hobbies")).map(|v| text(Some(v))))
}

fn target_role(course: &Map<String, Value>) -> String {
    let branch = text(course.get("branch"));
    if branch.trim().is_empty() {
        return sample_resume().target_role;
    }
    let degree = text(course.get("degree"));
    let degree = if degree.is_empty() { "Professional".to_string() } else { degree };
    format!("{branch} {degree}").trim().to_string()
}

fn section<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a Map<String, Value> {
    static EMPTY: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);
    obj.get(key).and_then(Value::as_object).unwrap_or(&*EMPTY)
}

/// Arrays yield their non-null items; any other non-null value is a single item.
fn items(value: Option<&Value>) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        None | Some(Value::Null) => Box::new(std::iter::empty()),
        Some(Value::Array(values)) => Box::new(values.iter().filter(|v| !v.is_null())),
        Some(other) => Box::new(std::iter::once(other)),
    }
}

fn join_texts(values: impl Iterator<Item = String>) -> String {
    values
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> Value {
        json!({
            "personal": {
                "firstName": "Priya",
                "lastName": "Sharma",
                "contactNumber": "98765 43210",
                "linkedIn": "https://linkedin.com/in/priya",
                "hobbies": ["Chess", "Running"]
            },
            "currentCourse": {
                "degree": "B.Tech",
                "branch": "Computer Science",
                "department": "School of Engineering",
                "aggregatePercentage": 8.7,
                "graduationYear": 2026
            },
            "education": {"tenthPercentage": 94, "twelfthPercentage": 91},
            "workExperience": [{
                "company": "Acme",
                "role": "Intern",
                "duration": "Summer 2025",
                "description": "• Built a scheduler\n- Cut costs by 20%\n\n",
                "technologiesUsed": ["Rust", "", "Postgres"]
            }],
            "projects": [{"title": "Tracker", "url": "https://github.com/p/tracker"}],
            "skills": {"technical": ["Rust", "SQL"], "soft": ["Leadership", "Rust"]},
            "certificates": [{"title": "AWS CCP"}, {"title": ""}, {"title": "CKA"}],
            "extracurricular": []
        })
    }

    #[test]
    fn test_maps_full_profile() {
        let user = json!({"username": "priya_s", "email": "priya@example.com"});
        let draft = map_profile_to_draft(&profile(), Some(&user)).unwrap();

        assert_eq!(draft.personal_info.name, "Priya Sharma");
        assert_eq!(draft.personal_info.email, "priya@example.com");
        assert_eq!(draft.personal_info.phone, "98765 43210");

        let edu = &draft.education[0];
        assert_eq!(edu.college, "School of Engineering");
        assert_eq!(edu.degree, "B.Tech - Computer Science");
        assert_eq!(edu.cgpa, "8.7");
        assert_eq!(edu.year, "2026");
        assert_eq!(edu.coursework, "10th: 94% | 12th: 91%");

        assert_eq!(
            draft.experience[0].description,
            vec!["Tech stack: Rust, Postgres", "Built a scheduler", "Cut costs by 20%"]
        );
        assert_eq!(draft.projects[0].github_link, "https://github.com/p/tracker");
        assert_eq!(draft.skills, vec!["Rust", "SQL", "Leadership"]);
        assert_eq!(draft.achievements, "AWS CCP; CKA");
        assert_eq!(draft.extracurriculars, "Chess; Running");
        assert_eq!(draft.target_role, "Computer Science B.Tech");
    }

    #[test]
    fn test_sparse_profile_gets_placeholders_and_defaults() {
        let user = json!({"username": "  sam  "});
        let draft = map_profile_to_draft(&json!({}), Some(&user)).unwrap();

        assert_eq!(draft.personal_info.name, "sam");
        assert_eq!(draft.education, vec![EducationEntry::default()]);
        assert_eq!(draft.experience, vec![ExperienceEntry::default()]);
        assert_eq!(draft.projects, vec![ProjectEntry::default()]);
        assert_eq!(draft.skills, vec![DEFAULT_SKILL]);
        assert_eq!(draft.target_role, sample_resume().target_role);
    }

    #[test]
    fn test_branch_without_degree_is_professional() {
        let draft =
            map_profile_to_draft(&json!({"currentCourse": {"branch": "Mechanical"}}), None).unwrap();
        assert_eq!(draft.target_role, "Mechanical Professional");
        assert_eq!(draft.education[0].college, "");
        assert_eq!(draft.education[0].degree, "Mechanical");
    }

    #[test]
    fn test_non_object_profile_is_none() {
        assert!(map_profile_to_draft(&Value::Null, None).is_none());
        assert!(map_profile_to_draft(&json!("profile"), None).is_none());
    }
}
