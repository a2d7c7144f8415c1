//! Assembles a profile into a block tree, one section per facet.

use crate::block::{Block, List, Span};
use crate::profile::{Education, PersonalInfo, Profile, Project, WorkExperience};

/// Résumé sections in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    WorkExperience,
    Projects,
    Skills,
    Education,
    Courses,
    Languages,
    Additional,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Summary,
        Section::WorkExperience,
        Section::Projects,
        Section::Skills,
        Section::Education,
        Section::Courses,
        Section::Languages,
        Section::Additional,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Summary => "Professional Summary",
            Section::WorkExperience => "Work Experience",
            Section::Projects => "Projects",
            Section::Skills => "Skills",
            Section::Education => "Education",
            Section::Courses => "Courses",
            Section::Languages => "Languages",
            Section::Additional => "Additional",
        }
    }

    /// Courses, languages and additional notes are left out when empty.
    fn is_present(self, profile: &Profile) -> bool {
        match self {
            Section::Courses => !profile.courses.is_empty(),
            Section::Languages => !profile.languages.is_empty(),
            Section::Additional => !profile.additional.is_empty(),
            _ => true,
        }
    }
}

/// Build the document for `profile`: a contact header followed by every
/// present section in [`Section::ALL`] order.
pub fn assemble(profile: &Profile) -> Vec<Block> {
    let mut blocks = header(&profile.personal_info);

    for section in Section::ALL {
        if !section.is_present(profile) {
            continue;
        }
        blocks.push(Block::Rule);
        blocks.push(Block::Heading {
            level: 2,
            content: vec![Span::text(section.title())],
        });
        section_body(section, profile, &mut blocks);
    }

    blocks
}

/// Sections present in an assembled document, in order.
pub fn sections(blocks: &[Block]) -> Vec<Section> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Heading { level: 2, content } => match content.as_slice() {
                [Span::Text(title)] => Section::ALL.into_iter().find(|s| s.title() == title.as_str()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

fn header(info: &PersonalInfo) -> Vec<Block> {
    let mut blocks = vec![Block::Heading {
        level: 1,
        content: vec![Span::text(&info.name)],
    }];

    let mut contact = Vec::new();
    for line in [&info.email, &info.phone, &info.location] {
        push_line(&mut contact, contact_span(line));
    }
    for line in [&info.linkedin, &info.github, &info.portfolio] {
        if !line.is_empty() {
            push_line(&mut contact, contact_span(line));
        }
    }
    if !contact.is_empty() {
        blocks.push(Block::Paragraph { content: contact });
    }

    blocks
}

fn push_line(spans: &mut Vec<Span>, span: Span) {
    if !spans.is_empty() {
        spans.push(Span::LineBreak);
    }
    spans.push(span);
}

fn contact_span(value: &str) -> Span {
    if value.starts_with("https://") || value.starts_with("http://") {
        Span::Link {
            url: value.to_string(),
            content: vec![Span::text(value)],
        }
    } else if value.contains('@') && !value.contains(' ') {
        Span::Link {
            url: format!("mailto:{}", value),
            content: vec![Span::text(value)],
        }
    } else {
        Span::text(value)
    }
}

fn section_body(section: Section, profile: &Profile, blocks: &mut Vec<Block>) {
    match section {
        Section::Summary => paragraph(blocks, vec![Span::text(&profile.summary)]),
        Section::WorkExperience => profile
            .work_experience
            .iter()
            .for_each(|experience| work_experience(experience, blocks)),
        Section::Projects => profile
            .projects
            .iter()
            .for_each(|project| project_entry(project, blocks)),
        Section::Skills => {
            for (category, skills) in profile.skills.iter() {
                paragraph(
                    blocks,
                    vec![
                        Span::bold(category),
                        Span::LineBreak,
                        Span::text(skills.join(", ")),
                    ],
                );
            }
        }
        Section::Education => profile
            .education
            .iter()
            .for_each(|education| education_entry(education, blocks)),
        Section::Courses => list(blocks, &profile.courses),
        Section::Languages => paragraph(blocks, vec![Span::text(profile.languages.join(" | "))]),
        Section::Additional => {
            paragraph(blocks, vec![Span::text(profile.additional.join(" | "))])
        }
    }
}

fn work_experience(experience: &WorkExperience, blocks: &mut Vec<Block>) {
    paragraph(
        blocks,
        vec![
            Span::bold(&experience.title),
            Span::LineBreak,
            Span::text(format!("{} · ", experience.company)),
            Span::italic(&experience.period),
        ],
    );
    list(blocks, &experience.responsibilities);
    if let Some(technologies) = &experience.technologies {
        technologies_line(technologies, blocks);
    }
}

fn project_entry(project: &Project, blocks: &mut Vec<Block>) {
    paragraph(
        blocks,
        vec![
            Span::bold(&project.name),
            Span::LineBreak,
            Span::text(&project.description),
        ],
    );
    list(blocks, &project.achievements);
    technologies_line(&project.technologies, blocks);
}

fn education_entry(education: &Education, blocks: &mut Vec<Block>) {
    paragraph(
        blocks,
        vec![
            Span::bold(&education.degree),
            Span::LineBreak,
            Span::text(format!("{} · ", education.institution)),
            Span::italic(&education.period),
        ],
    );
    if !education.details.is_empty() {
        paragraph(blocks, vec![Span::text(&education.details)]);
    }
}

fn technologies_line(technologies: &[String], blocks: &mut Vec<Block>) {
    let names: Vec<&str> = technologies
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if !names.is_empty() {
        paragraph(
            blocks,
            vec![Span::italic(format!("Technologies: {}", names.join(", ")))],
        );
    }
}

fn paragraph(blocks: &mut Vec<Block>, content: Vec<Span>) {
    blocks.push(Block::Paragraph { content });
}

fn list(blocks: &mut Vec<Block>, lines: &[String]) {
    if !lines.is_empty() {
        blocks.push(Block::List(List::from_lines(lines)));
    }
}
