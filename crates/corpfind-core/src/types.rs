//! Core data types for company lookup.
//!
//! This module defines the fundamental data structures:
//!
//! - [`CorpCode`] - DART corporate identifier
//! - [`CompanyRecord`] - A single company entry from the registry feed

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A DART corporate code.
///
/// An opaque, fixed-width identifier assigned by the registry. Unlike a
/// ticker it carries no semantics; it is stored and compared verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CorpCode(String);

impl CorpCode {
    /// Creates a new corporate code from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CorpCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for CorpCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CorpCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A single company entry from the registry feed.
///
/// Records are immutable between refreshes; the whole set is replaced
/// wholesale on every rebuild.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Corporate code assigned by the registry (primary key).
    pub corp_code: CorpCode,
    /// Display name, UTF-8.
    pub corp_name: String,
    /// Exchange ticker; 6 numeric digits for listed companies, blank
    /// otherwise. Feed values may carry whitespace padding.
    pub stock_code: String,
    /// Last-modified stamp from the feed (YYYYMMDD), informational only.
    pub modify_date: String,
}

impl CompanyRecord {
    /// Creates a new company record.
    #[must_use]
    pub fn new(
        corp_code: impl Into<CorpCode>,
        corp_name: impl Into<String>,
        stock_code: impl Into<String>,
        modify_date: impl Into<String>,
    ) -> Self {
        Self {
            corp_code: corp_code.into(),
            corp_name: corp_name.into(),
            stock_code: stock_code.into(),
            modify_date: modify_date.into(),
        }
    }

    /// Returns true if this company is exchange-listed.
    ///
    /// A company is listed iff its trimmed `stock_code` is exactly 6 ASCII
    /// digits. This predicate gates search visibility, not storage.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        let code = self.stock_code.trim();
        code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
    }

    /// Returns the lowercase projection of the display name.
    ///
    /// The index stores this alongside the record so search never case-folds
    /// at query time.
    #[must_use]
    pub fn name_lower(&self) -> String {
        self.corp_name.to_lowercase()
    }

    /// Parses the `modify_date` stamp, if well-formed.
    #[must_use]
    pub fn modified_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.modify_date.trim(), "%Y%m%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corp_code_roundtrip() {
        let code = CorpCode::new("00126380");
        assert_eq!(code.as_str(), "00126380");
        assert_eq!(code.to_string(), "00126380");
        assert_eq!(CorpCode::from("00126380"), code);
    }

    #[test]
    fn test_listed_predicate() {
        let listed = CompanyRecord::new("00126380", "Samsung Electronics", "005930", "20240101");
        assert!(listed.is_listed());

        // Feed pads unlisted entries with a single space
        let unlisted = CompanyRecord::new("00999999", "Some Holding", " ", "20240101");
        assert!(!unlisted.is_listed());

        let short = CompanyRecord::new("00999998", "Short Code", "12345", "20240101");
        assert!(!short.is_listed());

        let alpha = CompanyRecord::new("00999997", "Alpha Code", "00593A", "20240101");
        assert!(!alpha.is_listed());

        // Padding around a valid ticker still counts as listed
        let padded = CompanyRecord::new("00999996", "Padded", " 005930 ", "20240101");
        assert!(padded.is_listed());
    }

    #[test]
    fn test_name_lower() {
        let record = CompanyRecord::new("00126380", "Samsung Electronics", "005930", "20240101");
        assert_eq!(record.name_lower(), "samsung electronics");
    }

    #[test]
    fn test_modified_on() {
        let record = CompanyRecord::new("00126380", "Samsung Electronics", "005930", "20240102");
        assert_eq!(
            record.modified_on(),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );

        let blank = CompanyRecord::new("00126380", "Samsung Electronics", "005930", "");
        assert_eq!(blank.modified_on(), None);
    }
}
