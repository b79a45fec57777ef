//! Error types for map building
//!
//! Every fallible operation in the library returns [`MapError`]. The CLI wraps
//! these in `anyhow` at the top level.
//!
//! # Examples
//!
//! ```rust
//! use keplergl::errors::MapError;
//!
//! let err = MapError::NameCountMismatch { data: 2, names: 3 };
//! assert!(err.is_contract_violation());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration, normalizing data or rendering
#[derive(Error, Debug)]
pub enum MapError {
    /// The config template path does not exist
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The config template is not valid JSON after credential substitution
    #[error("Malformed configuration: {0}")]
    MalformedConfig(#[source] serde_json::Error),

    /// The config template parsed but does not have the expected shape
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Explicit dataset names do not line up with the data
    #[error("data and names are iterables of different length ({data} data, {names} names)")]
    NameCountMismatch { data: usize, names: usize },

    /// The same dataset name was supplied twice in one call
    #[error("Duplicate dataset name: {0}")]
    DuplicateName(String),

    /// Input file extension is not one we can load
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Input file could not be parsed
    #[error("Parsing error: {0}")]
    ParseError(String),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MapError {
    /// Caller bugs rather than environmental failures
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            MapError::NameCountMismatch { .. } | MapError::DuplicateName(_)
        )
    }

    /// Problems with the config template, whether missing or malformed
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            MapError::ConfigNotFound(_)
                | MapError::MalformedConfig(_)
                | MapError::InvalidConfiguration(_)
        )
    }
}

/// Result type alias for map building operations
pub type MapResult<T> = Result<T, MapError>;
