use crate::config::{ConfigError, load_config};
use serde::Deserialize;
use std::path::Path;

/// Body size limit applied when [`Tools::max_json_size`] is zero (10 MiB).
pub const DEFAULT_MAX_JSON_SIZE: usize = 10_485_760;

/// Decoder configuration for the JSON reader.
///
/// Both fields are plain data: copy the value into router state or build one per call.
///
/// ```rust
/// use webtools::{DEFAULT_MAX_JSON_SIZE, Tools};
///
/// let tools = Tools::default();
/// assert_eq!(tools.effective_max_json_size(), DEFAULT_MAX_JSON_SIZE);
/// assert!(!tools.allow_unknown_fields);
/// ```
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Tools {
    /// Maximum accepted body size in bytes; `0` selects [`DEFAULT_MAX_JSON_SIZE`].
    pub max_json_size: usize,
    /// Accept keys that have no counterpart in the target type.
    pub allow_unknown_fields: bool,
}

impl Tools {
    #[must_use]
    pub const fn with_max_json_size(mut self, bytes: usize) -> Self {
        self.max_json_size = bytes;
        self
    }

    #[must_use]
    pub const fn with_unknown_fields(mut self, allow: bool) -> Self {
        self.allow_unknown_fields = allow;
        self
    }

    /// Size limit actually enforced by the reader.
    #[must_use]
    pub const fn effective_max_json_size(&self) -> usize {
        if self.max_json_size == 0 { DEFAULT_MAX_JSON_SIZE } else { self.max_json_size }
    }

    /// Loads the configuration from a file plus `WEBTOOLS__*` environment overrides.
    ///
    /// See [`load_config`] for the layering rules.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file is missing or holds values of the wrong type.
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        load_config(path)
    }
}
