//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.repofolio.toml` files.

use crate::analysis::aggregator::DEFAULT_DISPLAY_LIMIT;
use crate::cli::OutputFormat;
use crate::github::{GitHubSettings, ListOptions, Ownership};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".repofolio.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// GitHub API settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Project selection settings.
    #[serde(default)]
    pub projects: ProjectsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            format: OutputFormat::default(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "featured_projects.md".to_string()
}

/// GitHub API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Account whose repositories are listed.
    #[serde(default)]
    pub username: String,

    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Page size of the single listing request.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Which repositories to list.
    #[serde(default)]
    pub ownership: Ownership,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            api_url: default_api_url(),
            per_page: default_per_page(),
            ownership: Ownership::default(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_per_page() -> u32 {
    100
}

fn default_timeout() -> u64 {
    30
}

/// Project selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsConfig {
    /// Repository names never shown.
    #[serde(default)]
    pub hidden: Vec<String>,

    /// Repository names preferred for display. Empty means no preference.
    #[serde(default)]
    pub featured: Vec<String>,

    /// Maximum number of projects shown.
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,

    /// Maximum number of topic chips rendered per project.
    #[serde(default = "default_max_topics")]
    pub max_topics_shown: usize,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            hidden: Vec::new(),
            featured: Vec::new(),
            display_limit: default_display_limit(),
            max_topics_shown: default_max_topics(),
        }
    }
}

fn default_display_limit() -> usize {
    DEFAULT_DISPLAY_LIMIT
}

fn default_max_topics() -> usize {
    8
}

impl From<&GitHubConfig> for GitHubSettings {
    fn from(config: &GitHubConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            timeout_seconds: config.timeout_seconds,
        }
    }
}

impl From<&GitHubConfig> for ListOptions {
    fn from(config: &GitHubConfig) -> Self {
        Self {
            per_page: config.per_page,
            ownership: config.ownership,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.repofolio.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref user) = args.user {
            self.github.username = user.clone();
        }
        if let Some(ref api_url) = args.api_url {
            self.github.api_url = api_url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.github.timeout_seconds = timeout;
        }
        if let Some(ownership) = args.ownership {
            self.github.ownership = ownership;
        }

        if let Some(ref hidden) = args.hide {
            self.projects.hidden = hidden.clone();
        }
        if let Some(ref featured) = args.feature {
            self.projects.featured = featured.clone();
        }
        if let Some(limit) = args.limit {
            self.projects.display_limit = limit;
        }

        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(format) = args.format {
            self.general.format = format;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check values that cannot be caught by parsing alone.
    pub fn validate(&self) -> Result<()> {
        if self.github.username.trim().is_empty() {
            anyhow::bail!(
                "No GitHub username configured; pass --user or set [github] username in {}",
                CONFIG_FILE_NAME
            );
        }
        if self.github.per_page == 0 || self.github.per_page > 100 {
            anyhow::bail!("per_page must be between 1 and 100");
        }
        if self.github.timeout_seconds == 0 {
            anyhow::bail!("Timeout must be at least 1 second");
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
