#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/corpfind/corpfind/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Company-name search index and resolution for DART corporate codes.
//!
//! This crate ties the pieces together: it re-exports core types, the index
//! backends, and the DART provider, and adds the [`Resolver`] (query path)
//! and [`Refresher`] (rebuild orchestration).
//!
//! # Features
//!
//! - `dart` - DART registry provider for the bulk company feed
//! - `index-sqlite` - Persistent SQLite-backed index
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use corpfind::{DartProvider, IndexConfig, Refresher, Resolver, SqliteIndex};
//!
//! #[tokio::main]
//! async fn main() -> corpfind::Result<()> {
//!     let config = IndexConfig::new("my-dart-api-key");
//!     let store = Arc::new(SqliteIndex::new(&config.index_path)?);
//!     let feed = Arc::new(DartProvider::new(&config));
//!
//!     let report = Refresher::new(feed, store.clone()).refresh().await?;
//!     println!("Indexed {} companies ({} listed)", report.total, report.listed);
//!
//!     let resolver = Resolver::new(store);
//!     for company in resolver.search_default("samsung").await? {
//!         println!("{} ({})", company.corp_name, company.stock_code);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use corpfind_core::*;

// Index implementations
pub use corpfind_index::InMemoryIndex;
#[cfg(feature = "index-sqlite")]
pub use corpfind_index::SqliteIndex;

// Providers
#[cfg(feature = "dart")]
pub use corpfind_dart::{DartProvider, ReportCode};

mod refresh;
mod resolver;

pub use refresh::{RefreshReport, Refresher};
pub use resolver::{DEFAULT_SEARCH_LIMIT, Resolver};
