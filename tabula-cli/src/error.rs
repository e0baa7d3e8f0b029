//! CLI error type.

use std::path::PathBuf;

use tabula::{ConfigError, TableError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not a JSON array of row objects: {source}", path.display())]
    Rows {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to create log file '{}': {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialise logging: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}
