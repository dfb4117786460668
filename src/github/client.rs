//! GitHub REST API client.
//!
//! Issues a single "list repositories for a user" request per call.
//! There is no retry; a failed request is reported to the caller as is.

use crate::github::{FetchError, ListOptions, RepositorySource};
use crate::models::RepositoryRecord;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("repofolio/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// Connection settings for the client.
#[derive(Debug, Clone)]
pub struct GitHubSettings {
    /// Base URL of the REST API.
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Error body GitHub sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for a GitHub-compatible REST API.
pub struct GitHubClient {
    settings: GitHubSettings,
    http_client: reqwest::Client,
}

impl GitHubClient {
    /// Create a new client.
    pub fn new(settings: GitHubSettings) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        info!(
            "GitHub client ready for {} (timeout {}s)",
            settings.api_url, settings.timeout_seconds
        );

        Ok(Self {
            settings,
            http_client,
        })
    }

    fn repos_url(&self, username: &str) -> String {
        format!(
            "{}/users/{}/repos",
            self.settings.api_url.trim_end_matches('/'),
            username
        )
    }

    /// List one page of repositories for `username`.
    pub async fn list_repositories(
        &self,
        username: &str,
        options: &ListOptions,
    ) -> Result<Vec<RepositoryRecord>, FetchError> {
        let url = self.repos_url(username);
        debug!("GET {} (per_page={}, type={})", url, options.per_page, options.ownership);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("per_page", options.per_page.to_string()),
                ("type", options.ownership.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);
            warn!("GitHub API error {}: {}", status, message);
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let records: Vec<RepositoryRecord> = response.json().await?;
        info!("Fetched {} repositories for {}", records.len(), username);

        Ok(records)
    }
}

impl RepositorySource for GitHubClient {
    fn list_for_user<'a>(
        &'a self,
        username: &'a str,
        options: &'a ListOptions,
    ) -> BoxFuture<'a, Result<Vec<RepositoryRecord>, FetchError>> {
        self.list_repositories(username, options).boxed()
    }
}
