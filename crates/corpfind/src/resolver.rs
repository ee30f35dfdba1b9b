//! Query-path resolution of free-text company names.

use std::sync::Arc;

use corpfind_core::{CompanyRecord, CompanyStore, CorpCode, CorpError, Result};
use tracing::debug;

/// Default maximum number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Read-path component answering free-text company searches.
///
/// Holds no mutable state of its own; every call is one read against the
/// underlying [`CompanyStore`]. Matching is pure substring containment over
/// the lowercased display name, with no fuzzy matching and no relevance
/// scoring (a deliberate simplicity tradeoff).
pub struct Resolver {
    store: Arc<dyn CompanyStore>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

impl Resolver {
    /// Creates a resolver reading from the given store.
    #[must_use]
    pub fn new(store: Arc<dyn CompanyStore>) -> Self {
        Self { store }
    }

    /// Searches listed companies whose name contains `query`.
    ///
    /// The query is trimmed and lowercased before matching. Results are
    /// ordered by display name ascending (corporate code breaks ties) and
    /// truncated to `limit`.
    ///
    /// # Errors
    /// Returns [`CorpError::InvalidQuery`] for empty or whitespace-only
    /// input ("asked nothing" is distinct from "found nothing") and
    /// [`CorpError::Storage`] when the index is unavailable.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<CompanyRecord>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(CorpError::InvalidQuery(
                "search term must not be empty".to_string(),
            ));
        }

        let fragment = trimmed.to_lowercase();
        debug!(fragment = %fragment, limit, "Resolving company search");
        self.store.search_substring(&fragment, limit).await
    }

    /// Searches with the default result limit.
    pub async fn search_default(&self, query: &str) -> Result<Vec<CompanyRecord>> {
        self.search(query, DEFAULT_SEARCH_LIMIT).await
    }

    /// Looks up a single record by exact corporate code.
    ///
    /// Not gated by the listed predicate; unlisted records are retrievable
    /// here even though search never returns them.
    pub async fn lookup(&self, corp_code: &CorpCode) -> Result<Option<CompanyRecord>> {
        self.store.get(corp_code).await
    }
}
