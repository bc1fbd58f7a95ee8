use crate::models::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDraft};

/// Sample draft served when a student has no stored profile.
pub fn sample_resume() -> ResumeDraft {
    ResumeDraft {
        personal_info: PersonalInfo {
            name: "Alex Johnson".to_string(),
            email: "alex.j@example.com".to_string(),
            phone: "555-500-1234".to_string(),
            linkedin: "https://linkedin.com/in/alexj".to_string(),
            github: "https://github.com/alexj-dev".to_string(),
            portfolio: "https://alexj.dev".to_string(),
        },
        education: vec![EducationEntry {
            college: "State University".to_string(),
            degree: "M.S. Data Science".to_string(),
            cgpa: "3.9".to_string(),
            year: "2025".to_string(),
            coursework: "Machine Learning, Cloud Computing, Distributed Systems".to_string(),
        }],
        skills: ["Python", "TensorFlow", "React", "AWS", "Data Pipelines"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        experience: vec![ExperienceEntry {
            company: "Tech Innovators".to_string(),
            role: "Data Science Intern".to_string(),
            duration: "May 2024 - Aug 2024".to_string(),
            description: vec![
                "Developed automated ETL jobs that reduced data preparation time by 30%."
                    .to_string(),
                "Experimented with transformer models to uplift recommendation CTR by 12%."
                    .to_string(),
            ],
        }],
        projects: vec![ProjectEntry {
            title: "AI Resume Grader".to_string(),
            technologies: "React, Node, Rust".to_string(),
            description: "Built a full-stack tool that analyses resumes and suggests targeted improvements."
                .to_string(),
            github_link: "https://github.com/alexj-dev/ai-resume-grader".to_string(),
        }],
        achievements: "Dean's List (2023, 2024)".to_string(),
        extracurriculars:
            "Volunteer mentor at local coding bootcamp; organiser of Data Science Club hackathons."
                .to_string(),
        target_role: "Machine Learning Engineer".to_string(),
    }
}
