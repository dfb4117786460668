//! Project aggregation.
//!
//! Turns the raw repository list for one account into a bounded, ranked
//! and enriched list of projects: hide filter, feature filter, recency
//! sort, truncation, then enrichment.

use crate::analysis::enrich::enrich;
use crate::models::{DisplayProject, RepositoryRecord};
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::debug;

/// Number of projects shown when nothing else is configured.
pub const DEFAULT_DISPLAY_LIMIT: usize = 4;

/// Settings for a single aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Account the records belong to.
    pub username: String,
    /// Names that never appear in the output.
    pub hidden: HashSet<String>,
    /// Preferred names; empty means no preference.
    pub featured: HashSet<String>,
    /// Maximum number of projects returned.
    pub display_limit: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            hidden: HashSet::new(),
            featured: HashSet::new(),
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }
}

impl From<&crate::config::Config> for AggregatorConfig {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            username: config.github.username.clone(),
            hidden: config.projects.hidden.iter().cloned().collect(),
            featured: config.projects.featured.iter().cloned().collect(),
            display_limit: config.projects.display_limit,
        }
    }
}

/// Run the full pipeline. Never fails; missing fields degrade to defaults.
pub fn aggregate(records: &[RepositoryRecord], config: &AggregatorConfig) -> Vec<DisplayProject> {
    let visible = filter_hidden(records, &config.hidden);
    let mut selected = select_featured(visible, &config.featured);

    // Stable, so equal timestamps keep input order.
    selected.sort_by_key(|r| Reverse(r.updated_millis()));
    selected.truncate(config.display_limit);

    debug!(
        "Aggregated {} of {} repositories for {}",
        selected.len(),
        records.len(),
        config.username
    );

    selected.into_iter().map(enrich).collect()
}

/// Drop records whose name is hidden.
pub fn filter_hidden<'a>(
    records: &'a [RepositoryRecord],
    hidden: &HashSet<String>,
) -> Vec<&'a RepositoryRecord> {
    records
        .iter()
        .filter(|r| !hidden.contains(&r.name))
        .collect()
}

/// Keep only featured records, falling back to everything when none match.
pub fn select_featured<'a>(
    records: Vec<&'a RepositoryRecord>,
    featured: &HashSet<String>,
) -> Vec<&'a RepositoryRecord> {
    if featured.is_empty() {
        return records;
    }

    let matching: Vec<_> = records
        .iter()
        .copied()
        .filter(|r| featured.contains(&r.name))
        .collect();

    if matching.is_empty() {
        debug!("No featured repositories found, using all visible repositories");
        records
    } else {
        matching
    }
}
