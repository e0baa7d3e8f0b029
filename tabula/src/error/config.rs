//! ConfigError for loading table configuration

use std::path::PathBuf;

/// Error type for loading a [`TableConfig`](crate::TableConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid JSON for a table configuration.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Page size must be at least one.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}
