//! Store trait for the persistent company index.
//!
//! This module defines the [`CompanyStore`] trait that provides a unified
//! interface over the index backends (SQLite, in-memory).

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{CompanyRecord, CorpCode},
};

/// Persistent, indexed table of company records.
///
/// The store exclusively owns persisted records: all mutation goes through
/// [`rebuild`](Self::rebuild), and the query path only ever reads. Backends
/// must support concurrent readers; rebuilds are externally serialized.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Idempotently creates the table and its supporting indexes.
    ///
    /// Safe to call on every startup.
    async fn ensure_schema(&self) -> Result<()>;

    /// Replaces the entire record set with `records`.
    ///
    /// Runs delete-all + insert-all as one unit: readers never observe a
    /// partially emptied table. The lowercase name projection is recomputed
    /// for each record on the way in.
    async fn rebuild(&self, records: &[CompanyRecord]) -> Result<()>;

    /// Returns listed companies whose lowercase name contains `fragment`.
    ///
    /// `fragment` must already be lowercased by the caller. Results are
    /// ordered by display name ascending (corporate code breaks ties) and
    /// truncated to `limit`. Unlisted and malformed-ticker records are
    /// never returned.
    async fn search_substring(&self, fragment: &str, limit: usize) -> Result<Vec<CompanyRecord>>;

    /// Looks up a record by exact corporate code.
    ///
    /// Unlike search, this is not gated by the listed predicate.
    async fn get(&self, corp_code: &CorpCode) -> Result<Option<CompanyRecord>>;

    /// Returns the total number of stored records.
    async fn count_all(&self) -> Result<usize>;

    /// Returns the number of stored records satisfying the listed predicate.
    async fn count_listed(&self) -> Result<usize>;
}
