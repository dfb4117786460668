//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::github::Ownership;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Repofolio - featured projects for your portfolio, straight from GitHub
///
/// Lists a GitHub account's repositories, picks the most recently updated
/// (or your featured ones), fills in missing descriptions and topics, and
/// writes a Markdown or JSON document for your site to render.
///
/// Examples:
///   repofolio --user octocat
///   repofolio --user octocat --feature zelp,Flickr_Clone --format json -o projects.json
///   repofolio --input repos.json --user octocat
///   repofolio --user octocat --watch 300
///   repofolio --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// GitHub account whose repositories are listed
    ///
    /// Can also be set via REPOFOLIO_USER or [github] username in .repofolio.toml.
    #[arg(short, long, value_name = "NAME", env = "REPOFOLIO_USER")]
    pub user: Option<String>,

    /// Output file path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .repofolio.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of projects to show
    #[arg(long, value_name = "COUNT")]
    pub limit: Option<usize>,

    /// Repositories to hide (comma-separated)
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub hide: Option<Vec<String>>,

    /// Repositories to feature (comma-separated)
    ///
    /// Only these are shown when at least one of them exists; otherwise
    /// the most recently updated repositories are used.
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub feature: Option<Vec<String>>,

    /// Read repositories from a saved API response instead of GitHub
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// GitHub REST API base URL
    #[arg(long, value_name = "URL", env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Which repositories of the account to list
    #[arg(long, value_name = "TYPE")]
    pub ownership: Option<Ownership>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Keep running and refresh every SECS seconds until interrupted
    #[arg(long, value_name = "SECS")]
    pub watch: Option<u64>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .repofolio.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref api_url) = self.api_url {
            if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(ref user) = self.user {
            if user.trim().is_empty() || user.contains('/') {
                return Err(format!("Invalid GitHub username: '{}'", user));
            }
        }

        if self.limit == Some(0) {
            return Err("Limit must be at least 1".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.timeout == Some(0) {
            return Err("Timeout must be at least 1 second".to_string());
        }

        if self.watch == Some(0) {
            return Err("Watch interval must be at least 1 second".to_string());
        }

        if let Some(ref input) = self.input {
            if !input.is_file() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is `[general] verbose` from the config file; `--quiet` beats both.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
