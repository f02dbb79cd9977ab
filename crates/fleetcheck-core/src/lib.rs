//! fleetcheck-core — domain types and configuration for the fleet checker.
//!
//! Defines the agent fleet configuration document, the per-endpoint probe
//! result, and the per-agent health report that the runner produces. All
//! types are serializable so reports can be rendered as JSON and configs
//! round-trip through TOML.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, LogError};
pub use types::*;
