//! Keyword rule tables used for enrichment.
//!
//! Each table is an ordered list of `(Matcher, value)` pairs evaluated
//! top to bottom; the first rule whose matcher accepts the record wins.

/// Predicate over a repository's name and language.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Lower-cased name contains any of the keywords.
    NameContains(&'static [&'static str]),
    /// Language label equals one of the labels exactly.
    LanguageIs(&'static [&'static str]),
    /// Language label contains the fragment.
    LanguageContains(&'static str),
}

impl Matcher {
    /// `name_lower` must already be lower-cased.
    pub fn matches(&self, name_lower: &str, language: &str) -> bool {
        match self {
            Matcher::NameContains(keywords) => keywords.iter().any(|k| name_lower.contains(k)),
            Matcher::LanguageIs(labels) => labels.contains(&language),
            Matcher::LanguageContains(fragment) => language.contains(*fragment),
        }
    }
}

/// A single table entry.
#[derive(Debug, Clone, Copy)]
pub struct Rule<T> {
    pub matcher: Matcher,
    pub value: T,
}

const fn rule<T>(matcher: Matcher, value: T) -> Rule<T> {
    Rule { matcher, value }
}

/// Return the value of the first matching rule.
pub fn first_match<T: 'static>(
    rules: &'static [Rule<T>],
    name: &str,
    language: &str,
) -> Option<&'static T> {
    let name_lower = name.to_lowercase();
    rules
        .iter()
        .find(|r| r.matcher.matches(&name_lower, language))
        .map(|r| &r.value)
}

const WEB_LANGUAGES: &[&str] = &["TypeScript", "JavaScript"];

/// Descriptions written in place of a missing one.
pub static DESCRIPTION_RULES: &[Rule<&str>] = &[
    rule(
        Matcher::NameContains(&["portfolio"]),
        "My personal portfolio website showcasing projects and skills in web development.",
    ),
    rule(
        Matcher::NameContains(&["flicker", "flickr"]),
        "A Flickr clone application for sharing and discovering photos.",
    ),
    rule(
        Matcher::NameContains(&["mern", "fullstack"]),
        "Full-stack application built with modern web technologies and best practices.",
    ),
    rule(
        Matcher::NameContains(&["yelp", "review"]),
        "A Yelp-inspired platform for discovering and reviewing local businesses.",
    ),
    rule(
        Matcher::NameContains(&["zelp"]),
        "Restaurant discovery and review application with interactive features.",
    ),
    rule(
        Matcher::LanguageIs(&["Python"]),
        "Python-based application showcasing backend development and data handling.",
    ),
    rule(
        Matcher::LanguageIs(WEB_LANGUAGES),
        "Web application built with modern JavaScript/TypeScript frameworks.",
    ),
];

/// Technologies appended to sparse topic lists.
pub static TOPIC_RULES: &[Rule<&[&str]>] = &[
    rule(
        Matcher::NameContains(&["portfolio"]),
        &["react", "nextjs", "tailwindcss", "typescript", "responsive-design"],
    ),
    rule(
        Matcher::NameContains(&["flickr", "flicker"]),
        &["react", "redux", "express", "aws", "image-processing"],
    ),
    rule(
        Matcher::NameContains(&["zelp"]),
        &["react", "express", "postgresql", "google-maps", "authentication"],
    ),
    rule(
        Matcher::LanguageIs(WEB_LANGUAGES),
        &["javascript", "nodejs", "react", "webpack", "express"],
    ),
    rule(
        Matcher::LanguageIs(&["Python"]),
        &["python", "flask", "sqlalchemy", "api", "data-science"],
    ),
];

/// Card images. Name rules precede language rules.
pub static IMAGE_RULES: &[Rule<&str>] = &[
    rule(Matcher::NameContains(&["portfolio"]), "/images/projects/portfolio.png"),
    rule(
        Matcher::NameContains(&["flickr", "flicker"]),
        "/images/projects/flickr-clone.jpg",
    ),
    rule(Matcher::NameContains(&["zelp"]), "/images/projects/zelp.jpg"),
    rule(Matcher::NameContains(&["mern"]), "/images/projects/mern.jpg"),
    rule(Matcher::LanguageIs(WEB_LANGUAGES), "/images/projects/javascript.jpg"),
    rule(Matcher::LanguageIs(&["Python"]), "/images/projects/python.jpg"),
    rule(Matcher::LanguageIs(&["HTML"]), "/images/projects/web.jpg"),
    rule(Matcher::LanguageContains("CSS"), "/images/projects/web.jpg"),
];

/// Image used when no rule matches.
pub const DEFAULT_IMAGE: &str = "/images/projects/code.jpg";
