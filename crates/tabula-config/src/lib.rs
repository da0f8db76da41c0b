//! Configuration model and loading for the category registry.
//!
//! This crate owns the registry config schema, JSON5 parsing, and validation
//! used by the core registry and the SDK facade.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Configuration schema models.
pub use model::*;
