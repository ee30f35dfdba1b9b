//! Refresh orchestration: feed download to index rebuild.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use corpfind_core::{CompanyFeed, CompanyStore, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcome of a completed refresh, for operational visibility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshReport {
    /// Total records imported from the feed.
    pub total: usize,
    /// Subset satisfying the listed predicate.
    pub listed: usize,
    /// When the rebuild completed.
    pub refreshed_at: DateTime<Utc>,
}

/// Coordinates re-downloading the feed and rebuilding the index.
///
/// The pipeline is linear: fetch + parse, then one transactional rebuild.
/// A failure at fetch or parse aborts before the store is touched, so the
/// previous index snapshot stays queryable. Intended to run periodically or
/// on operator demand, never on the query path; concurrent refreshes are
/// assumed to be serialized by operational practice.
pub struct Refresher {
    feed: Arc<dyn CompanyFeed>,
    store: Arc<dyn CompanyStore>,
}

impl std::fmt::Debug for Refresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refresher")
            .field("feed", &self.feed.name())
            .finish_non_exhaustive()
    }
}

impl Refresher {
    /// Creates a refresher wiring the given feed to the given store.
    #[must_use]
    pub fn new(feed: Arc<dyn CompanyFeed>, store: Arc<dyn CompanyStore>) -> Self {
        Self { feed, store }
    }

    /// Replaces the entire index with a freshly fetched record set.
    ///
    /// # Errors
    /// Propagates [`CorpError::Fetch`](corpfind_core::CorpError::Fetch) and
    /// [`CorpError::Parse`](corpfind_core::CorpError::Parse) from the feed
    /// (before any mutation) and
    /// [`CorpError::Storage`](corpfind_core::CorpError::Storage) from the
    /// rebuild.
    pub async fn refresh(&self) -> Result<RefreshReport> {
        info!(feed = self.feed.name(), "Starting company index refresh");

        let records = self.feed.fetch_and_parse().await?;
        debug!("Feed returned {} records", records.len());

        self.store.ensure_schema().await?;
        self.store.rebuild(&records).await?;

        let total = self.store.count_all().await?;
        let listed = self.store.count_listed().await?;
        let report = RefreshReport {
            total,
            listed,
            refreshed_at: Utc::now(),
        };

        info!(total, listed, "Company index refresh complete");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use corpfind_core::{CompanyRecord, CorpError};
    use corpfind_index::InMemoryIndex;

    #[derive(Debug)]
    struct FakeFeed {
        records: Vec<CompanyRecord>,
    }

    #[async_trait]
    impl CompanyFeed for FakeFeed {
        fn name(&self) -> &str {
            "fake"
        }

        async fn fetch_and_parse(&self) -> Result<Vec<CompanyRecord>> {
            Ok(self.records.clone())
        }
    }

    #[derive(Debug)]
    struct FailingFeed;

    #[async_trait]
    impl CompanyFeed for FailingFeed {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_and_parse(&self) -> Result<Vec<CompanyRecord>> {
            Err(CorpError::Fetch("HTTP 500: registry unavailable".to_string()))
        }
    }

    fn sample_records() -> Vec<CompanyRecord> {
        vec![
            CompanyRecord::new("00126380", "Samsung Electronics", "005930", "20240101"),
            CompanyRecord::new("00126186", "Samsung SDI", "006400", "20240101"),
            CompanyRecord::new("00434003", "Samsung Venture Investment", " ", "20240101"),
        ]
    }

    #[tokio::test]
    async fn test_refresh_reports_counts() {
        let store = Arc::new(InMemoryIndex::new());
        let feed = Arc::new(FakeFeed {
            records: sample_records(),
        });

        let refresher = Refresher::new(feed, store.clone());
        let report = refresher.refresh().await.unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.listed, 2);
        assert_eq!(store.count_all().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_refresh_replaces_previous_snapshot() {
        let store = Arc::new(InMemoryIndex::new());
        store.rebuild(&sample_records()).await.unwrap();

        let feed = Arc::new(FakeFeed {
            records: vec![CompanyRecord::new(
                "00164779",
                "SK Hynix",
                "000660",
                "20240201",
            )],
        });

        let refresher = Refresher::new(feed, store.clone());
        let report = refresher.refresh().await.unwrap();

        assert_eq!(report.total, 1);
        assert!(store.search_substring("samsung", 20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_feed_failure_leaves_index_untouched() {
        let store = Arc::new(InMemoryIndex::new());
        store.rebuild(&sample_records()).await.unwrap();

        let refresher = Refresher::new(Arc::new(FailingFeed), store.clone());
        let result = refresher.refresh().await;

        assert!(matches!(result, Err(CorpError::Fetch(_))));

        // Prior snapshot stays queryable unchanged
        let results = store.search_substring("samsung", 20).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(store.count_all().await.unwrap(), 3);
    }
}
