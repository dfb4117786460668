//! Backfilling of descriptions and topics.

use crate::analysis::rules::{first_match, DESCRIPTION_RULES, TOPIC_RULES};
use crate::models::{DisplayProject, RepositoryRecord};

/// Description GitHub front-ends show when the owner wrote none.
pub const PLACEHOLDER_DESCRIPTION: &str = "No description available";

/// Source topic count below which rule technologies are appended.
pub const MIN_SOURCE_TOPICS: usize = 4;

/// Turn a selected record into a display project.
pub fn enrich(record: &RepositoryRecord) -> DisplayProject {
    let language = record.language.clone().unwrap_or_default();

    DisplayProject {
        id: record.id,
        name: record.name.clone(),
        description: describe(&record.name, &language, record.description.as_deref()),
        topics: enrich_topics(&record.name, &language, &record.topics),
        language,
        html_url: record.html_url.clone(),
        homepage: record.homepage.clone().filter(|h| !h.is_empty()),
        updated_at: record.updated_at,
    }
}

/// Keep a real description, otherwise synthesise one from the rule table.
pub fn describe(name: &str, language: &str, description: Option<&str>) -> String {
    match description {
        Some(text) if !text.is_empty() && text != PLACEHOLDER_DESCRIPTION => text.to_string(),
        _ => first_match(DESCRIPTION_RULES, name, language)
            .map(|d| d.to_string())
            .unwrap_or_else(|| generic_description(language)),
    }
}

fn generic_description(language: &str) -> String {
    let subject = if language.is_empty() {
        "software"
    } else {
        language
    };
    format!(
        "A {} project demonstrating my technical skills and coding practices.",
        subject
    )
}

/// Deduplicate the source topics and, if there are few, append the
/// technologies of the first matching topic rule.
pub fn enrich_topics(name: &str, language: &str, topics: &[String]) -> Vec<String> {
    let mut enriched: Vec<String> = Vec::with_capacity(topics.len());
    for topic in topics {
        if !enriched.contains(topic) {
            enriched.push(topic.clone());
        }
    }

    if enriched.len() < MIN_SOURCE_TOPICS {
        if let Some(techs) = first_match(TOPIC_RULES, name, language) {
            for tech in techs.iter() {
                if !enriched.iter().any(|t| t == tech) {
                    enriched.push(tech.to_string());
                }
            }
        }
    }

    enriched
}
