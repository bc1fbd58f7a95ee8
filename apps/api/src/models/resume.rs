use serde::{Deserialize, Serialize};

/// Contact block at the top of a resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub college: String,
    pub degree: String,
    pub cgpa: String,
    pub year: String,
    pub coursework: String,
}

impl EducationEntry {
    pub fn is_blank(&self) -> bool {
        [
            &self.college,
            &self.degree,
            &self.cgpa,
            &self.year,
            &self.coursework,
        ]
        .iter()
        .all(|s| s.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub duration: String,
    /// Never empty: holds `[""]` when there is nothing to say.
    pub description: Vec<String>,
}

impl Default for ExperienceEntry {
    fn default() -> Self {
        Self {
            company: String::new(),
            role: String::new(),
            duration: String::new(),
            description: vec![String::new()],
        }
    }
}

impl ExperienceEntry {
    /// Bullets that carry actual text.
    pub fn bullet_count(&self) -> usize {
        self.description
            .iter()
            .filter(|b| !b.trim().is_empty())
            .count()
    }

    pub fn is_blank(&self) -> bool {
        self.company.trim().is_empty()
            && self.role.trim().is_empty()
            && self.duration.trim().is_empty()
            && self.bullet_count() == 0
    }

    /// Appends a bullet unless an identical one is already present.
    /// A lone `""` placeholder is replaced rather than kept alongside.
    pub fn push_bullet(&mut self, bullet: &str) -> bool {
        let bullet = bullet.trim();
        if bullet.is_empty() || self.description.iter().any(|b| b == bullet) {
            return false;
        }
        if self.bullet_count() == 0 {
            self.description.clear();
        }
        self.description.push(bullet.to_string());
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub title: String,
    pub technologies: String,
    pub description: String,
    pub github_link: String,
}

impl ProjectEntry {
    pub fn is_blank(&self) -> bool {
        [
            &self.title,
            &self.technologies,
            &self.description,
            &self.github_link,
        ]
        .iter()
        .all(|s| s.trim().is_empty())
    }
}

/// Canonical resume draft.
///
/// Every field is always present. `education`, `experience` and `projects`
/// always hold at least one entry (possibly a blank placeholder), and
/// `skills` never contains empty strings or duplicates. Build one with
/// `resume::normalizer::normalize_draft`; pipeline stages return new values
/// rather than mutating their input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDraft {
    pub personal_info: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub achievements: String,
    pub extracurriculars: String,
    pub target_role: String,
}

impl Default for ResumeDraft {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            education: vec![EducationEntry::default()],
            skills: Vec::new(),
            experience: vec![ExperienceEntry::default()],
            projects: vec![ProjectEntry::default()],
            achievements: String::new(),
            extracurriculars: String::new(),
            target_role: String::new(),
        }
    }
}

impl ResumeDraft {
    /// Adds a skill if it is non-empty and not already listed (case-sensitive).
    pub fn push_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    pub fn filled_education(&self) -> impl Iterator<Item = &EducationEntry> {
        self.education.iter().filter(|e| !e.is_blank())
    }

    pub fn filled_experience(&self) -> impl Iterator<Item = &ExperienceEntry> {
        self.experience.iter().filter(|e| !e.is_blank())
    }

    pub fn filled_projects(&self) -> impl Iterator<Item = &ProjectEntry> {
        self.projects.iter().filter(|p| !p.is_blank())
    }
}
