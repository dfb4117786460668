//! Repository sources.
//!
//! The aggregator never fetches anything itself; callers obtain records
//! through a [`RepositorySource`], either the GitHub REST API or a local
//! JSON file with the same shape.

pub mod client;
pub mod error;
pub mod file;

pub use client::{GitHubClient, GitHubSettings};
pub use error::{FetchError, FETCH_ERROR_MESSAGE};
pub use file::FileSource;

use crate::models::RepositoryRecord;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which repositories of the account to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    /// Repositories the account owns.
    #[default]
    Owner,
    /// Owned and member repositories.
    All,
    /// Repositories the account is a member of.
    Member,
}

impl Ownership {
    /// Value for the `type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ownership::Owner => "owner",
            Ownership::All => "all",
            Ownership::Member => "member",
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Listing parameters. Only a single page is ever requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub per_page: u32,
    pub ownership: Ownership,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            per_page: 100,
            ownership: Ownership::Owner,
        }
    }
}

/// Anything that can list an account's repositories.
pub trait RepositorySource: Send + Sync {
    fn list_for_user<'a>(
        &'a self,
        username: &'a str,
        options: &'a ListOptions,
    ) -> BoxFuture<'a, Result<Vec<RepositoryRecord>, FetchError>>;
}
