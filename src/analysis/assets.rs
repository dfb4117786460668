//! Presentation asset lookups: card images and language badges.

use crate::analysis::rules::{first_match, DEFAULT_IMAGE, IMAGE_RULES};
use crate::models::Language;
use serde::Serialize;

/// Icon and colour for a project's language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageBadge {
    pub icon: &'static str,
    pub color: &'static str,
}

/// Badge for languages outside the known set.
pub const UNKNOWN_LANGUAGE_BADGE: LanguageBadge = LanguageBadge {
    icon: "SiGithub",
    color: "#6e7681",
};

/// Badge for projects with no language at all.
pub const NO_LANGUAGE_BADGE: LanguageBadge = LanguageBadge {
    icon: "Code",
    color: "#9ca3af",
};

/// Pick the card image for a project.
///
/// Name keywords are checked first, then the language, then the default.
pub fn project_image(name: &str, language: &str) -> &'static str {
    first_match(IMAGE_RULES, name, language)
        .copied()
        .unwrap_or(DEFAULT_IMAGE)
}

/// Look up the badge for a language label.
pub fn language_badge(language: &str) -> LanguageBadge {
    if language.is_empty() {
        return NO_LANGUAGE_BADGE;
    }

    match Language::from_label(language) {
        Some(lang) => LanguageBadge {
            icon: lang.icon(),
            color: lang.color(),
        },
        None => UNKNOWN_LANGUAGE_BADGE,
    }
}
