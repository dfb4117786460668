//! Analysis modules.
//!
//! The project aggregator plus the keyword rule tables and asset lookups
//! it and the report generator rely on.

pub mod aggregator;
pub mod assets;
pub mod enrich;
pub mod rules;

pub use aggregator::{aggregate, AggregatorConfig};
pub use assets::{language_badge, project_image, LanguageBadge};
