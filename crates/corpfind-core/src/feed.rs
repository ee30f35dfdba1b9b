//! Feed trait for bulk company imports.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::Result, types::CompanyRecord};

/// Source of the full registered-company record set.
///
/// A feed issues one bulk request to its registry and returns every record
/// it knows about; the refresh orchestrator replaces the index wholesale
/// with the result. Implementations must not touch the index themselves.
#[async_trait]
pub trait CompanyFeed: Send + Sync + Debug {
    /// Returns the name of this feed (e.g., "DART").
    fn name(&self) -> &str;

    /// Downloads and parses the full company catalog.
    ///
    /// # Errors
    /// Returns [`CorpError::Fetch`](crate::CorpError::Fetch) when the
    /// transport call does not return a success status, and
    /// [`CorpError::Parse`](crate::CorpError::Parse) when the expected
    /// document is absent or malformed.
    async fn fetch_and_parse(&self) -> Result<Vec<CompanyRecord>>;
}
