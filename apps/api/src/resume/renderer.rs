//! Document Renderer — deterministic HTML fragment for a canonical draft.
//!
//! No external calls and no escaping: free text is inserted as-is. Callers
//! that display the fragment to other users must sanitize it themselves.

use crate::models::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeDraft};

const CONTACT_SEPARATOR: &str = " | ";

/// Renders the draft as a styled `<article>` fragment.
///
/// Sections appear in a fixed order and are omitted entirely when empty.
/// Blank placeholder entries are skipped.
pub fn render_resume(draft: &ResumeDraft) -> String {
    let sections = [
        section("Professional Summary", &summary_block(draft)),
        section("Skills", &skills_block(&draft.skills)),
        section("Experience", &join_blocks(draft.filled_experience(), experience_block)),
        section("Projects", &join_blocks(draft.filled_projects(), project_block)),
        section("Education", &join_blocks(draft.filled_education(), education_block)),
        section("Achievements & Certifications", &paragraph(&draft.achievements)),
        section("Extracurricular Activities", &paragraph(&draft.extracurriculars)),
    ];

    let mut html = String::from(
        "<article style=\"font-family:'Inter',sans-serif;max-width:800px;margin:0 auto;padding:32px;background:#ffffff;color:#111827;line-height:1.5;\">",
    );
    html.push_str(&header_block(draft));
    for block in sections.iter().filter(|s| !s.is_empty()) {
        html.push_str(block);
    }
    html.push_str("</article>");
    html
}

fn header_block(draft: &ResumeDraft) -> String {
    let info = &draft.personal_info;
    let name = if info.name.trim().is_empty() {
        "Full Name"
    } else {
        info.name.as_str()
    };

    let mut header = String::from("<header style=\"text-align:center;margin-bottom:24px;\">");
    header.push_str(&format!(
        "<h1 style=\"font-size:28px;margin-bottom:4px;\">{name}</h1>"
    ));
    for line in [
        contact_line(&[&info.email, &info.phone]),
        contact_line(&[&info.linkedin, &info.github, &info.portfolio]),
    ] {
        if !line.is_empty() {
            header.push_str(&format!("<p style=\"color:#4b5563;\">{line}</p>"));
        }
    }
    header.push_str("</header>");
    header
}

/// Joins present fields with the separator. Blank fields leave no gap.
fn contact_line(fields: &[&String]) -> String {
    fields
        .iter()
        .filter(|f| !f.trim().is_empty())
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}

fn section(title: &str, content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    format!(
        "<section style=\"margin-bottom:20px;\"><h2 style=\"font-size:18px;margin-bottom:8px;border-bottom:2px solid #e5e7eb;padding-bottom:4px;\">{title}</h2>{content}</section>"
    )
}

fn join_blocks<'a, T: 'a>(
    entries: impl Iterator<Item = &'a T>,
    render: fn(&T) -> String,
) -> String {
    entries.map(render).collect()
}

fn paragraph(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    format!("<p style=\"color:#374151;\">{text}</p>")
}

fn summary_block(draft: &ResumeDraft) -> String {
    if draft.target_role.trim().is_empty() {
        return String::new();
    }
    format!(
        "<p style=\"color:#374151;\">Target Role: {}</p>",
        draft.target_role
    )
}

fn skills_block(skills: &[String]) -> String {
    if skills.is_empty() {
        return String::new();
    }
    let items: String = skills
        .iter()
        .map(|skill| {
            format!(
                "<li style=\"background:#e0e7ff;color:#312e81;padding:6px 12px;border-radius:9999px;font-size:14px;\">{skill}</li>"
            )
        })
        .collect();
    format!("<ul style=\"display:flex;flex-wrap:wrap;gap:8px;padding:0;list-style:none;\">{items}</ul>")
}

/// Joins the non-blank parts with " • ".
fn headline(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}

fn experience_block(exp: &ExperienceEntry) -> String {
    let mut block = String::from("<div style=\"margin-bottom:16px;\">");
    let title = headline(&[exp.role.as_str(), exp.company.as_str()]);
    if !title.is_empty() {
        block.push_str(&format!(
            "<h3 style=\"font-size:16px;font-weight:600;\">{title}</h3>"
        ));
    }
    if !exp.duration.trim().is_empty() {
        block.push_str(&format!(
            "<p style=\"margin:4px 0;color:#1f2937;\">{}</p>",
            exp.duration
        ));
    }
    let bullets: String = exp
        .description
        .iter()
        .filter(|b| !b.trim().is_empty())
        .map(|b| format!("<li>{b}</li>"))
        .collect();
    if !bullets.is_empty() {
        block.push_str(&format!(
            "<ul style=\"margin:8px 0 0 20px;color:#374151;\">{bullets}</ul>"
        ));
    }
    block.push_str("</div>");
    block
}

fn project_block(proj: &ProjectEntry) -> String {
    let mut block = String::from("<div style=\"margin-bottom:12px;\">");
    if !proj.title.trim().is_empty() {
        block.push_str(&format!(
            "<h3 style=\"font-size:16px;font-weight:600;\">{}</h3>",
            proj.title
        ));
    }
    if !proj.technologies.trim().is_empty() {
        block.push_str(&format!(
            "<p style=\"margin:4px 0;color:#1f2937;\">Tech: {}</p>",
            proj.technologies
        ));
    }
    if !proj.description.trim().is_empty() {
        block.push_str(&format!(
            "<p style=\"margin:0;color:#374151;\">{}</p>",
            proj.description
        ));
    }
    if !proj.github_link.trim().is_empty() {
        block.push_str(&format!(
            "<p style=\"margin-top:4px;\"><a href=\"{}\" style=\"color:#2563eb;\">GitHub</a></p>",
            proj.github_link
        ));
    }
    block.push_str("</div>");
    block
}

fn education_block(edu: &EducationEntry) -> String {
    let mut block = String::from("<div style=\"margin-bottom:12px;\">");
    if !edu.college.trim().is_empty() {
        block.push_str(&format!(
            "<h3 style=\"font-size:16px;font-weight:600;\">{}</h3>",
            edu.college
        ));
    }
    let degree_line = headline(&[edu.degree.as_str(), edu.year.as_str()]);
    if !degree_line.is_empty() {
        block.push_str(&format!(
            "<p style=\"margin:4px 0;color:#1f2937;\">{degree_line}</p>"
        ));
    }
    let cgpa = if edu.cgpa.trim().is_empty() {
        "N/A"
    } else {
        edu.cgpa.as_str()
    };
    block.push_str(&format!(
        "<p style=\"margin:0;color:#4b5563;\">CGPA: {cgpa}</p>"
    ));
    if !edu.coursework.trim().is_empty() {
        block.push_str(&format!(
            "<p style=\"margin:4px 0;color:#4b5563;\">Coursework: {}</p>",
            edu.coursework
        ));
    }
    block.push_str("</div>");
    block
}
