//! Table configuration.

use std::num::NonZeroUsize;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::selection::SelectionMode;

/// Rows per page when none is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

/// Per-table configuration, supplied once at construction.
///
/// # Example
///
/// ```
/// use tabula::{SelectionMode, TableConfig};
///
/// let config = TableConfig::from_json_str(r#"{ "page_size": 25 }"#).unwrap();
/// assert_eq!(config.page_size.get(), 25);
/// assert_eq!(config.selection_mode, SelectionMode::Multiple);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableConfig {
    /// Initial rows per page.
    pub page_size: NonZeroUsize,
    /// How rows may be selected.
    pub selection_mode: SelectionMode,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            selection_mode: SelectionMode::default(),
        }
    }
}

/// On-disk form; validated into [`TableConfig`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawTableConfig {
    page_size: Option<usize>,
    selection_mode: Option<SelectionMode>,
}

impl TryFrom<RawTableConfig> for TableConfig {
    type Error = ConfigError;

    fn try_from(raw: RawTableConfig) -> Result<Self, Self::Error> {
        let page_size = match raw.page_size {
            Some(size) => NonZeroUsize::new(size).ok_or(ConfigError::ZeroPageSize)?,
            None => DEFAULT_PAGE_SIZE,
        };
        Ok(Self {
            page_size,
            selection_mode: raw.selection_mode.unwrap_or_default(),
        })
    }
}

impl TableConfig {
    /// Create a config with the given page size.
    pub fn new(page_size: usize) -> Result<Self, ConfigError> {
        let page_size = NonZeroUsize::new(page_size).ok_or(ConfigError::ZeroPageSize)?;
        Ok(Self {
            page_size,
            ..Default::default()
        })
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawTableConfig = serde_json::from_str(json)?;
        raw.try_into()
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::debug!("loaded table config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
