//! Data models for the featured-projects pipeline.
//!
//! This module contains the core data structures used throughout the
//! application: repository records as GitHub returns them, the enriched
//! projects handed to rendering, and the finished showcase document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One repository entry as returned by the GitHub "list repositories" API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Unique repository id.
    pub id: u64,
    /// Repository name, unique per account.
    pub name: String,
    /// Free-form description, if the owner wrote one.
    #[serde(default)]
    pub description: Option<String>,
    /// Topics in the order GitHub reports them.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topics: Vec<String>,
    /// Primary language label (e.g. "TypeScript").
    #[serde(default)]
    pub language: Option<String>,
    /// Homepage / live demo URL.
    #[serde(default)]
    pub homepage: Option<String>,
    /// Link to the repository itself.
    pub html_url: String,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RepositoryRecord {
    /// Creates a bare record with only the required fields set.
    #[cfg(test)]
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: None,
            topics: Vec::new(),
            language: None,
            homepage: None,
            html_url: format!("https://github.com/octocat/{}", name),
            updated_at: None,
        }
    }

    /// Sort key for recency; a missing timestamp counts as the epoch.
    pub fn updated_millis(&self) -> i64 {
        self.updated_at.map(|t| t.timestamp_millis()).unwrap_or(0)
    }
}

/// A project ready for display.
///
/// `description` is never empty and `language` is never null; both are
/// backfilled by the aggregator when the source record lacks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayProject {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub topics: Vec<String>,
    pub language: String,
    pub html_url: String,
    pub homepage: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl DisplayProject {
    /// Human-friendly title: first letter upper-cased, dashes become spaces.
    pub fn display_title(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => {
                let rest: String = chars.collect();
                format!("{}{}", first.to_uppercase(), rest.replace('-', " "))
            }
            None => String::new(),
        }
    }
}

/// Languages with a dedicated icon and brand colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Html,
    Css,
    Java,
    CSharp,
    Cpp,
    Ruby,
    Go,
    Php,
    Swift,
    Kotlin,
    Rust,
    Dart,
}

impl Language {
    /// Every known language, in table order.
    pub const ALL: [Language; 15] = [
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Html,
        Language::Css,
        Language::Java,
        Language::CSharp,
        Language::Cpp,
        Language::Ruby,
        Language::Go,
        Language::Php,
        Language::Swift,
        Language::Kotlin,
        Language::Rust,
        Language::Dart,
    ];

    /// Parse a GitHub language label. Matching is exact, as GitHub reports it.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.label() == label)
    }

    /// The label GitHub uses for this language.
    pub fn label(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Java => "Java",
            Language::CSharp => "C#",
            Language::Cpp => "C++",
            Language::Ruby => "Ruby",
            Language::Go => "Go",
            Language::Php => "PHP",
            Language::Swift => "Swift",
            Language::Kotlin => "Kotlin",
            Language::Rust => "Rust",
            Language::Dart => "Dart",
        }
    }

    /// Simple Icons component name.
    pub fn icon(&self) -> &'static str {
        match self {
            Language::JavaScript => "SiJavascript",
            Language::TypeScript => "SiTypescript",
            Language::Python => "SiPython",
            Language::Html => "SiHtml5",
            Language::Css => "SiCss3",
            Language::Java => "SiJava",
            Language::CSharp => "SiCsharp",
            Language::Cpp => "SiCplusplus",
            Language::Ruby => "SiRuby",
            Language::Go => "SiGo",
            Language::Php => "SiPhp",
            Language::Swift => "SiSwift",
            Language::Kotlin => "SiKotlin",
            Language::Rust => "SiRust",
            Language::Dart => "SiDart",
        }
    }

    /// Brand colour as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Language::JavaScript => "#F7DF1E",
            Language::TypeScript => "#3178C6",
            Language::Python => "#3776AB",
            Language::Html => "#E34F26",
            Language::Css => "#1572B6",
            Language::Java => "#007396",
            Language::CSharp => "#239120",
            Language::Cpp => "#00599C",
            Language::Ruby => "#CC342D",
            Language::Go => "#00ADD8",
            Language::Php => "#777BB4",
            Language::Swift => "#FA7343",
            Language::Kotlin => "#7F52FF",
            Language::Rust => "#DEA584",
            Language::Dart => "#0175C2",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Metadata about a generated showcase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowcaseMetadata {
    /// Account whose repositories were listed.
    pub username: String,
    /// When the document was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of records the source returned.
    pub repositories_fetched: usize,
    /// Number of projects selected for display.
    pub projects_shown: usize,
}

/// The finished featured-projects document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Showcase {
    pub metadata: ShowcaseMetadata,
    pub projects: Vec<DisplayProject>,
}
