//! The current featured-projects result.
//!
//! Every refresh takes a [`Ticket`]. Taking a ticket supersedes all
//! earlier ones, and only the holder of the newest ticket may publish, so
//! a slow earlier fetch can never overwrite a faster later one.

use crate::analysis::{aggregate, AggregatorConfig};
use crate::github::{ListOptions, RepositorySource};
use crate::models::DisplayProject;
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// What readers currently see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    /// A refresh is in flight.
    Loading,
    /// The last refresh succeeded.
    Ready {
        projects: Vec<DisplayProject>,
        /// Records the source returned before filtering.
        fetched: usize,
    },
    /// The last refresh failed; holds the user-facing message.
    Failed(String),
}

/// Proof of having started a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Single result slot with latest-ticket-wins publishing.
pub struct ProjectFeed {
    latest: Mutex<u64>,
    tx: watch::Sender<FeedState>,
}

impl Default for ProjectFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FeedState::Loading);
        Self {
            latest: Mutex::new(0),
            tx,
        }
    }

    /// Start a refresh, superseding any in flight.
    pub fn begin(&self) -> Ticket {
        let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        *latest += 1;
        self.tx.send_replace(FeedState::Loading);
        debug!("Refresh {} started", *latest);
        Ticket(*latest)
    }

    /// Publish `state` if `ticket` is still the newest. Returns whether it was published.
    pub fn commit(&self, ticket: Ticket, state: FeedState) -> bool {
        let latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        if ticket.0 != *latest {
            debug!(
                "Discarding stale result from refresh {} (latest is {})",
                ticket.0, *latest
            );
            return false;
        }
        self.tx.send_replace(state);
        true
    }

    /// Fetch, aggregate and publish.
    ///
    /// A failed fetch publishes [`FeedState::Failed`] and never a partial list.
    /// Returns whether the result was published.
    pub async fn refresh<S>(
        &self,
        source: &S,
        options: &ListOptions,
        config: &AggregatorConfig,
    ) -> bool
    where
        S: RepositorySource + ?Sized,
    {
        let ticket = self.begin();

        match source.list_for_user(&config.username, options).await {
            Ok(records) => {
                let projects = aggregate(&records, config);
                info!(
                    "Selected {} featured projects from {} repositories",
                    projects.len(),
                    records.len()
                );
                let state = FeedState::Ready {
                    projects,
                    fetched: records.len(),
                };
                self.commit(ticket, state)
            }
            Err(e) => {
                error!("Failed to fetch repositories for {}: {}", config.username, e);
                self.commit(ticket, FeedState::Failed(e.user_message().to_string()))
            }
        }
    }

    /// Receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.tx.subscribe()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> FeedState {
        self.tx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::FetchError;
    use crate::models::RepositoryRecord;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::time::Duration;

    struct StaticSource {
        records: Vec<RepositoryRecord>,
        delay: Duration,
    }

    impl RepositorySource for StaticSource {
        fn list_for_user<'a>(
            &'a self,
            _username: &'a str,
            _options: &'a ListOptions,
        ) -> BoxFuture<'a, Result<Vec<RepositoryRecord>, FetchError>> {
            async move {
                tokio::time::sleep(self.delay).await;
                Ok(self.records.clone())
            }
            .boxed()
        }
    }

    struct FailingSource;

    impl RepositorySource for FailingSource {
        fn list_for_user<'a>(
            &'a self,
            _username: &'a str,
            _options: &'a ListOptions,
        ) -> BoxFuture<'a, Result<Vec<RepositoryRecord>, FetchError>> {
            async {
                Err(FetchError::Status {
                    status: 500,
                    message: "boom".to_string(),
                })
            }
            .boxed()
        }
    }

    fn project(name: &str) -> DisplayProject {
        crate::analysis::enrich::enrich(&RepositoryRecord::new(1, name))
    }

    fn ready(projects: Vec<DisplayProject>) -> FeedState {
        let fetched = projects.len();
        FeedState::Ready { projects, fetched }
    }

    #[test]
    fn test_stale_commit_discarded() {
        let feed = ProjectFeed::new();
        let first = feed.begin();
        let second = feed.begin();

        assert!(feed.commit(second, ready(vec![project("new")])));
        assert!(!feed.commit(first, ready(vec![project("old")])));
        assert_eq!(feed.snapshot(), ready(vec![project("new")]));
    }

    #[test]
    fn test_begin_resets_to_loading() {
        let feed = ProjectFeed::new();
        let ticket = feed.begin();
        feed.commit(ticket, ready(vec![]));
        feed.begin();
        assert_eq!(feed.snapshot(), FeedState::Loading);
    }

    #[test]
    fn test_refresh_publishes_projects() {
        let feed = ProjectFeed::new();
        let source = StaticSource {
            records: vec![RepositoryRecord::new(1, "zelp")],
            delay: Duration::ZERO,
        };

        let committed = tokio_test::block_on(feed.refresh(
            &source,
            &ListOptions::default(),
            &AggregatorConfig::default(),
        ));

        assert!(committed);
        match feed.snapshot() {
            FeedState::Ready { projects, fetched } => {
                assert_eq!(fetched, 1);
                assert_eq!(projects[0].name, "zelp");
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_failure_shows_error_only() {
        let feed = ProjectFeed::new();
        let committed = feed
            .refresh(&FailingSource, &ListOptions::default(), &AggregatorConfig::default())
            .await;

        assert!(committed);
        assert_eq!(
            feed.snapshot(),
            FeedState::Failed("Error fetching featured projects".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_earlier_refresh_does_not_win() {
        let feed = ProjectFeed::new();
        let slow = StaticSource {
            records: vec![RepositoryRecord::new(1, "slow")],
            delay: Duration::from_secs(10),
        };
        let fast = StaticSource {
            records: vec![RepositoryRecord::new(2, "fast")],
            delay: Duration::from_secs(1),
        };
        let options = ListOptions::default();
        let config = AggregatorConfig::default();

        // join! polls in order, so the slow refresh takes its ticket first.
        let (slow_committed, fast_committed) = tokio::join!(
            feed.refresh(&slow, &options, &config),
            feed.refresh(&fast, &options, &config),
        );

        assert!(fast_committed);
        assert!(!slow_committed);
        match feed.snapshot() {
            FeedState::Ready { projects, .. } => assert_eq!(projects[0].name, "fast"),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_subscribers_see_commits() {
        let feed = ProjectFeed::new();
        let mut rx = feed.subscribe();

        let ticket = feed.begin();
        feed.commit(ticket, ready(vec![]));

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), ready(vec![]));
    }
}
