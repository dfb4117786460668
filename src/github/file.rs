//! Offline repository source backed by a JSON file.

use crate::github::{FetchError, ListOptions, RepositorySource};
use crate::models::RepositoryRecord;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::path::PathBuf;
use tracing::info;

/// Reads a saved "list repositories" response from disk.
///
/// The username and ownership filter are ignored; `per_page` still caps
/// the number of records, as a single API page would.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn load(&self, options: &ListOptions) -> Result<Vec<RepositoryRecord>, FetchError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let mut records: Vec<RepositoryRecord> = serde_json::from_str(&content)?;
        records.truncate(options.per_page as usize);

        info!(
            "Loaded {} repositories from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

impl RepositorySource for FileSource {
    fn list_for_user<'a>(
        &'a self,
        _username: &'a str,
        options: &'a ListOptions,
    ) -> BoxFuture<'a, Result<Vec<RepositoryRecord>, FetchError>> {
        self.load(options).boxed()
    }
}
