//! Featured-projects document generation.
//!
//! This module renders a [`Showcase`] as Markdown or JSON, and renders the
//! failure view used when the repositories could not be fetched.

use crate::analysis::{language_badge, project_image, LanguageBadge};
use crate::models::{DisplayProject, Showcase, ShowcaseMetadata};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Section heading shared by every view.
const HEADING: &str = "Featured Projects";

/// Shown when no repository survives filtering.
pub const EMPTY_PLACEHOLDER: &str = "No projects to display yet.";

/// Generate the complete Markdown document.
pub fn generate_markdown_report(showcase: &Showcase, max_topics: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", HEADING));
    output.push_str(&generate_metadata_section(&showcase.metadata));

    if showcase.projects.is_empty() {
        output.push_str(&format!("{}\n\n", EMPTY_PLACEHOLDER));
    } else {
        for project in &showcase.projects {
            output.push_str(&generate_project_card(project, max_topics));
        }
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the failure view: heading and message, nothing else.
pub fn generate_error_markdown(message: &str) -> String {
    format!("# {}\n\n> **{}**\n", HEADING, message)
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ShowcaseMetadata) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "- **GitHub:** [{0}](https://github.com/{0})\n",
        metadata.username
    ));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Projects:** {} of {} repositories\n\n",
        metadata.projects_shown, metadata.repositories_fetched
    ));

    section
}

/// Generate the card for a single project.
fn generate_project_card(project: &DisplayProject, max_topics: usize) -> String {
    let mut card = String::new();

    card.push_str(&format!("## {}\n\n", project.display_title()));
    card.push_str(&format!(
        "![{}]({})\n\n",
        project.name,
        project_image(&project.name, &project.language)
    ));

    if !project.language.is_empty() {
        let badge = language_badge(&project.language);
        card.push_str(&format!(
            "*{}* `{}` `{}`\n\n",
            project.language, badge.icon, badge.color
        ));
    }

    card.push_str(&format!("{}\n\n", project.description));
    card.push_str(&format!("📅 {}\n\n", format_updated(project.updated_at)));

    card.push_str("**Technologies:** ");
    card.push_str(&topic_chips(project, max_topics).join(" "));
    card.push_str("\n\n");

    card.push_str(&format!("[View Code]({})", project.html_url));
    if let Some(ref homepage) = project.homepage {
        card.push_str(&format!(" · [Live Demo]({})", homepage));
    }
    card.push_str("\n\n---\n\n");

    card
}

/// Topic chips, capped at `max_topics` plus an overflow marker.
///
/// Projects without topics get a single chip naming the language.
fn topic_chips(project: &DisplayProject, max_topics: usize) -> Vec<String> {
    if project.topics.is_empty() {
        let label = if project.language.is_empty() {
            "Coding Project"
        } else {
            project.language.as_str()
        };
        return vec![format!("`{}`", label)];
    }

    let mut chips: Vec<String> = project
        .topics
        .iter()
        .take(max_topics)
        .map(|t| format!("`{}`", t))
        .collect();

    if project.topics.len() > max_topics {
        chips.push(format!("`+{} more`", project.topics.len() - max_topics));
    }

    chips
}

/// "Updated on Mar 5, 2024".
pub fn format_updated(updated_at: Option<DateTime<Utc>>) -> String {
    match updated_at {
        Some(date) => format!("Updated on {}", date.format("%b %-d, %Y")),
        None => "Updated date unknown".to_string(),
    }
}

/// Generate the report footer.
fn generate_footer() -> String {
    "*Generated by [Repofolio](https://github.com/repofolio/repofolio)*\n".to_string()
}

/// A project together with its presentation assets.
#[derive(Debug, Serialize)]
struct ProjectCard<'a> {
    #[serde(flatten)]
    project: &'a DisplayProject,
    title: String,
    image: &'static str,
    #[serde(flatten)]
    badge: LanguageBadge,
}

#[derive(Debug, Serialize)]
struct ShowcaseDocument<'a> {
    metadata: &'a ShowcaseMetadata,
    projects: Vec<ProjectCard<'a>>,
}

/// Generate a JSON document.
pub fn generate_json_report(showcase: &Showcase) -> Result<String> {
    let document = ShowcaseDocument {
        metadata: &showcase.metadata,
        projects: showcase
            .projects
            .iter()
            .map(|project| ProjectCard {
                project,
                title: project.display_title(),
                image: project_image(&project.name, &project.language),
                badge: language_badge(&project.language),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&document).map_err(Into::into)
}

/// Generate the JSON failure view.
pub fn generate_error_json(message: &str) -> Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({ "error": message })).map_err(Into::into)
}
