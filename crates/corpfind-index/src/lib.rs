#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/corpfind/corpfind/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Company index store implementations.
//!
//! This crate provides implementations of the [`CompanyStore`] trait from
//! `corpfind-core`:
//!
//! - [`SqliteIndex`] - Persistent SQLite-backed index (default, requires
//!   the `sqlite` feature)
//! - [`InMemoryIndex`] - Simple in-memory index for testing

/// In-memory index implementation.
pub mod memory;

/// SQLite-based index implementation.
#[cfg(feature = "sqlite")]
pub mod sqlite;

// Re-export the trait for convenience
pub use corpfind_core::CompanyStore;

// Re-export implementations
pub use memory::InMemoryIndex;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteIndex;
