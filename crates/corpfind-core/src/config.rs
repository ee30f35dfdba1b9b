//! Configuration for the lookup pipeline.
//!
//! The original system read API keys into process-wide globals at startup;
//! here every component takes an explicit [`IndexConfig`] at construction so
//! tests can inject fake credentials and paths.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout applied to registry requests.
pub const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default index database filename.
pub const DEFAULT_INDEX_PATH: &str = "dart.db";

/// Configuration shared by the feed provider and the index store.
#[derive(Clone, Debug)]
pub struct IndexConfig {
    /// API credential sent to the registry as a query parameter.
    pub registry_credential: String,
    /// Bound on each registry request.
    pub refresh_timeout: Duration,
    /// Location of the index database file.
    pub index_path: PathBuf,
    /// Directory where feed artifacts (archive, extracted document) land.
    pub artifact_dir: PathBuf,
}

impl IndexConfig {
    /// Creates a configuration with the given registry credential and
    /// defaults for everything else.
    #[must_use]
    pub fn new(registry_credential: impl Into<String>) -> Self {
        Self {
            registry_credential: registry_credential.into(),
            refresh_timeout: DEFAULT_REFRESH_TIMEOUT,
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            artifact_dir: PathBuf::from("."),
        }
    }

    /// Sets the registry request timeout.
    #[must_use]
    pub const fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    /// Sets the index database path.
    #[must_use]
    pub fn with_index_path(mut self, path: impl AsRef<Path>) -> Self {
        self.index_path = path.as_ref().to_path_buf();
        self
    }

    /// Sets the directory for feed artifacts.
    #[must_use]
    pub fn with_artifact_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.artifact_dir = dir.as_ref().to_path_buf();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IndexConfig::new("test-key");
        assert_eq!(config.registry_credential, "test-key");
        assert_eq!(config.refresh_timeout, DEFAULT_REFRESH_TIMEOUT);
        assert_eq!(config.index_path, PathBuf::from(DEFAULT_INDEX_PATH));
    }

    #[test]
    fn test_builders() {
        let config = IndexConfig::new("test-key")
            .with_refresh_timeout(Duration::from_secs(5))
            .with_index_path("/tmp/corp.db")
            .with_artifact_dir("/tmp/artifacts");
        assert_eq!(config.refresh_timeout, Duration::from_secs(5));
        assert_eq!(config.index_path, PathBuf::from("/tmp/corp.db"));
        assert_eq!(config.artifact_dir, PathBuf::from("/tmp/artifacts"));
    }
}
