#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/corpfind/corpfind/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for DART company lookup.
//!
//! This crate provides the foundational abstractions for resolving company
//! names to corporate codes:
//!
//! - [`CompanyFeed`](feed::CompanyFeed) - Bulk registry feed importer
//! - [`CompanyStore`](store::CompanyStore) - Persistent company index
//! - [`CompanyRecord`](types::CompanyRecord) - The normalized record model
//! - [`CorpError`](error::CorpError) - Error taxonomy
//! - [`IndexConfig`](config::IndexConfig) - Component configuration

/// Configuration for the lookup pipeline.
pub mod config;
/// Error types for company lookup operations.
pub mod error;
/// Feed trait for bulk company imports.
pub mod feed;
/// Store trait for the persistent company index.
pub mod store;
/// Core data types (CorpCode, CompanyRecord).
pub mod types;

// Re-export commonly used items at crate root
pub use config::{DEFAULT_INDEX_PATH, DEFAULT_REFRESH_TIMEOUT, IndexConfig};
pub use error::{CorpError, Result};
pub use feed::CompanyFeed;
pub use store::CompanyStore;
pub use types::{CompanyRecord, CorpCode};
