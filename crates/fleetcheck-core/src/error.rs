//! Error types for the fleet checker.
//!
//! Only configuration errors are fatal; everything that goes wrong while
//! checking a single agent is absorbed into that agent's report.

use thiserror::Error;

/// Result type alias for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating the configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors raised while producing a log tail.
///
/// These never abort an agent check; the runner records them as notes on
/// the report.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("logs type {backend:?} requires {field}")]
    Missing {
        backend: &'static str,
        field: &'static str,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to spawn {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    /// The external process outlived its deadline. Whatever it wrote to
    /// stdout before being killed is preserved in `partial`.
    #[error("{bin} timed out")]
    Timeout { bin: String, partial: String },

    /// Nonzero exit; the message is the trimmed stderr, or the exit status
    /// when stderr was empty.
    #[error("{0}")]
    Failed(String),
}
