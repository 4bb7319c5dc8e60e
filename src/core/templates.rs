//! Template catalog and the text renderers used for the preview step.
//!
//! The backend knows four template ids but the preview only has two layouts:
//! `creative` borrows the modern layout and `minimal` the professional one.

use crate::core::wizard::WizardStep;
use crate::domain::model::ResumeData;
use crate::utils::error::{Result, WizardError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Professional,
    Creative,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Modern,
    Professional,
}

/// Accent used when the catalog is shown in a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Blue,
    Gray,
    Magenta,
    Green,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Modern,
        TemplateId::Professional,
        TemplateId::Creative,
        TemplateId::Minimal,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Professional => "professional",
            TemplateId::Creative => "creative",
            TemplateId::Minimal => "minimal",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TemplateId::Modern => "Modern",
            TemplateId::Professional => "Professional",
            TemplateId::Creative => "Creative",
            TemplateId::Minimal => "Minimal",
        }
    }

    pub fn accent(&self) -> Accent {
        match self {
            TemplateId::Modern => Accent::Blue,
            TemplateId::Professional => Accent::Gray,
            TemplateId::Creative => Accent::Magenta,
            TemplateId::Minimal => Accent::Green,
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            TemplateId::Modern | TemplateId::Creative => Layout::Modern,
            TemplateId::Professional | TemplateId::Minimal => Layout::Professional,
        }
    }
}

impl FromStr for TemplateId {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        TemplateId::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| WizardError::UnknownTemplate(s.to_string()))
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

pub fn render_preview(template: TemplateId, data: &ResumeData, width: usize) -> String {
    match template.layout() {
        Layout::Modern => render_modern(data, width),
        Layout::Professional => render_professional(data, width),
    }
}

fn render_modern(data: &ResumeData, width: usize) -> String {
    let mut lines = Vec::new();

    lines.push(format!("┃ {}", data.name));
    for contact in [&data.email, &data.phone] {
        if !contact.is_empty() {
            lines.push(format!("┃ {}", contact));
        }
    }

    if !data.summary.is_empty() {
        push_heading(&mut lines, "PROFESSIONAL SUMMARY", '═');
        lines.extend(wrap(&data.summary, width));
    }

    if !data.experience.is_empty() {
        push_heading(&mut lines, "EXPERIENCE", '═');
        for (idx, exp) in data.experience.iter().enumerate() {
            if idx > 0 {
                lines.push(String::new());
            }
            lines.push(exp.title.clone());
            lines.push(format!("{} | {}", exp.company, exp.period));
            lines.extend(wrap(&exp.description, width));
        }
    }

    if !data.skills.is_empty() {
        push_heading(&mut lines, "SKILLS", '═');
        let chips = data
            .skills
            .iter()
            .map(|skill| format!("[{}]", skill))
            .collect::<Vec<_>>()
            .join(" ");
        lines.extend(wrap(&chips, width));
    }

    finish(lines)
}

fn render_professional(data: &ResumeData, width: usize) -> String {
    let mut lines = Vec::new();

    lines.push(center(&data.name, width));
    let contact = [data.email.as_str(), data.phone.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");
    if !contact.is_empty() {
        lines.push(center(&contact, width));
    }
    lines.push("━".repeat(width));

    if !data.summary.is_empty() {
        push_heading(&mut lines, "SUMMARY", '─');
        lines.extend(wrap(&data.summary, width));
    }

    if !data.experience.is_empty() {
        push_heading(&mut lines, "EXPERIENCE", '─');
        for exp in &data.experience {
            lines.push(spread(&exp.title, &exp.period, width));
            lines.push(exp.company.clone());
            lines.extend(wrap(&exp.description, width));
        }
    }

    if !data.education.is_empty() {
        push_heading(&mut lines, "EDUCATION", '─');
        for edu in &data.education {
            lines.push(spread(&edu.degree, &edu.year, width));
            lines.push(edu.institution.clone());
        }
    }

    if !data.skills.is_empty() {
        push_heading(&mut lines, "SKILLS", '─');
        lines.extend(wrap(&data.skills.join(" • "), width));
    }

    finish(lines)
}

/// The "AI Extracted Information" panel shown while choosing a template.
pub fn render_extracted_summary(data: &ResumeData) -> String {
    let or_missing = |value: &str| {
        if value.is_empty() {
            "Not found".to_string()
        } else {
            value.to_string()
        }
    };

    let mut lines = vec![
        format!("Name:   {}", data.name),
        format!("Email:  {}", or_missing(&data.email)),
        format!("Phone:  {}", or_missing(&data.phone)),
        format!("Skills: {} found", data.skills.len()),
    ];
    if !data.skills.is_empty() {
        lines.push(format!("        {}", data.skills.join(", ")));
    }
    if let Some(score) = data.score {
        lines.push(format!("Score:  {:.0}/100", score));
    }
    lines.join("\n")
}

pub const STEP_SEPARATOR: &str = " ── ";

/// One `(highlighted, text)` pair per step. Finished steps and the current
/// one are highlighted; the current step is bracketed.
pub fn step_segments(current: WizardStep) -> Vec<(bool, String)> {
    WizardStep::ALL
        .iter()
        .map(|step| {
            let text = if *step < current {
                format!("(✓) {}", step.label())
            } else if *step == current {
                format!("[{}] {}", step.number(), step.label())
            } else {
                format!("({}) {}", step.number(), step.label())
            };
            (*step <= current, text)
        })
        .collect()
}

fn push_heading(lines: &mut Vec<String>, title: &str, rule: char) {
    lines.push(String::new());
    lines.push(title.to_string());
    lines.push(rule.to_string().repeat(title.width()));
}

fn finish(mut lines: Vec<String>) -> String {
    lines.push(String::new());
    lines.join("\n")
}

fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn spread(left: &str, right: &str, width: usize) -> String {
    let used = left.width() + right.width();
    if right.is_empty() {
        return left.to_string();
    }
    let gap = width.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

/// Greedy word wrap on display width; words longer than `width` get their own line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Education, Experience};

    fn sample() -> ResumeData {
        ResumeData {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            summary: "Backend engineer with ten years of experience building payment systems."
                .to_string(),
            skills: vec!["Rust".to_string(), "PostgreSQL".to_string(), "AWS".to_string()],
            experience: vec![Experience {
                title: "Staff Engineer".to_string(),
                company: "Acme".to_string(),
                period: "2019 - Present".to_string(),
                description: "Led the ledger rewrite".to_string(),
            }],
            education: vec![Education {
                degree: "BSc Computer Science".to_string(),
                institution: "State University".to_string(),
                year: "2012".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_template_lookup_maps_to_two_layouts() {
        assert_eq!(TemplateId::Creative.layout(), Layout::Modern);
        assert_eq!(TemplateId::Minimal.layout(), Layout::Professional);
        assert_eq!(TemplateId::default(), TemplateId::Modern);
        assert_eq!("Minimal".parse::<TemplateId>().unwrap(), TemplateId::Minimal);
        assert!(matches!(
            "executive".parse::<TemplateId>(),
            Err(WizardError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_creative_renders_like_modern() {
        let data = sample();
        assert_eq!(
            render_preview(TemplateId::Creative, &data, 60),
            render_preview(TemplateId::Modern, &data, 60)
        );
        assert_eq!(
            render_preview(TemplateId::Minimal, &data, 60),
            render_preview(TemplateId::Professional, &data, 60)
        );
    }

    #[test]
    fn test_modern_layout_sections() {
        let out = render_preview(TemplateId::Modern, &sample(), 60);
        assert!(out.starts_with("┃ Jane Doe\n┃ jane@example.com\n┃ 555-123-4567"));
        assert!(out.contains("PROFESSIONAL SUMMARY"));
        assert!(out.contains("Acme | 2019 - Present"));
        assert!(out.contains("[Rust] [PostgreSQL] [AWS]"));
        assert!(!out.contains("EDUCATION"));
    }

    #[test]
    fn test_professional_layout_sections() {
        let out = render_preview(TemplateId::Professional, &sample(), 60);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0].trim(), "Jane Doe");
        assert!(lines[0].starts_with(' '));
        assert_eq!(lines[1].trim(), "jane@example.com | 555-123-4567");
        assert!(out.contains("EDUCATION"));
        assert!(out.contains("Rust • PostgreSQL • AWS"));

        let title_line = lines
            .iter()
            .find(|l| l.starts_with("Staff Engineer"))
            .unwrap();
        assert!(title_line.ends_with("2019 - Present"));
        assert_eq!(title_line.width(), 60);
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let data = ResumeData {
            name: "Sam".to_string(),
            phone: "555".to_string(),
            ..Default::default()
        };
        let modern = render_preview(TemplateId::Modern, &data, 40);
        assert_eq!(modern, "┃ Sam\n┃ 555\n");

        let professional = render_preview(TemplateId::Professional, &data, 40);
        assert!(professional.contains("555"));
        assert!(!professional.contains(" | "));
        assert!(!professional.contains("SUMMARY"));
        assert!(!professional.contains("SKILLS"));
    }

    #[test]
    fn test_extracted_summary_panel() {
        let mut data = sample();
        data.email.clear();
        data.score = Some(85.0);
        let panel = render_extracted_summary(&data);
        assert!(panel.contains("Email:  Not found"));
        assert!(panel.contains("Phone:  555-123-4567"));
        assert!(panel.contains("Skills: 3 found"));
        assert!(panel.contains("Score:  85/100"));
    }

    #[test]
    fn test_step_indicator_marks_completed_steps() {
        let texts = |step| {
            step_segments(step)
                .into_iter()
                .map(|(_, text)| text)
                .collect::<Vec<_>>()
        };
        assert_eq!(
            texts(WizardStep::Upload),
            vec!["[1] Upload", "(2) Choose Template", "(3) Generate"]
        );
        assert_eq!(
            texts(WizardStep::Generate),
            vec!["(✓) Upload", "(✓) Choose Template", "[3] Generate"]
        );
    }

    #[test]
    fn test_current_step_stands_out_from_later_steps() {
        let segments = step_segments(WizardStep::ChooseTemplate);
        assert_eq!(
            segments,
            vec![
                (true, "(✓) Upload".to_string()),
                (true, "[2] Choose Template".to_string()),
                (false, "(3) Generate".to_string()),
            ]
        );
        assert_ne!(segments[1].0, segments[2].0);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(
            wrap("one two three four", 9),
            vec!["one two", "three", "four"]
        );
        assert_eq!(wrap("supercalifragilistic", 5), vec!["supercalifragilistic"]);
        assert!(wrap("   ", 10).is_empty());
    }
}
