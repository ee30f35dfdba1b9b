//! In-memory index implementation.

use async_trait::async_trait;
use corpfind_core::{CompanyRecord, CompanyStore, CorpCode, Result};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Simple in-memory index for testing and development.
///
/// Records are held in a `RwLock`-protected vector and are lost when the
/// index is dropped. Matching and ordering mirror [`SqliteIndex`] exactly so
/// tests against either backend observe the same results.
///
/// [`SqliteIndex`]: crate::SqliteIndex
#[derive(Debug, Default)]
pub struct InMemoryIndex {
    records: RwLock<Vec<CompanyRecord>>,
}

impl InMemoryIndex {
    /// Creates a new empty in-memory index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyStore for InMemoryIndex {
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn rebuild(&self, records: &[CompanyRecord]) -> Result<()> {
        let mut guard = self.records.write().await;
        *guard = records.to_vec();
        debug!("Rebuilt in-memory index with {} records", records.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn search_substring(&self, fragment: &str, limit: usize) -> Result<Vec<CompanyRecord>> {
        let guard = self.records.read().await;
        let mut matches: Vec<CompanyRecord> = guard
            .iter()
            .filter(|r| r.is_listed() && r.name_lower().contains(fragment))
            .cloned()
            .collect();

        matches.sort_by(|a, b| {
            a.corp_name
                .cmp(&b.corp_name)
                .then_with(|| a.corp_code.cmp(&b.corp_code))
        });
        matches.truncate(limit);

        for record in &mut matches {
            record.stock_code = record.stock_code.trim().to_string();
        }

        debug!("Found {} matching records", matches.len());
        Ok(matches)
    }

    async fn get(&self, corp_code: &CorpCode) -> Result<Option<CompanyRecord>> {
        let guard = self.records.read().await;
        Ok(guard.iter().find(|r| &r.corp_code == corp_code).cloned())
    }

    async fn count_all(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }

    async fn count_listed(&self) -> Result<usize> {
        let guard = self.records.read().await;
        Ok(guard.iter().filter(|r| r.is_listed()).count())
    }
}
