//! Errors raised while reading and checking a registry config file.

use thiserror::Error;

/// Failure to produce a usable `RegistryConfig`.
///
/// Field-level problems carry a `label:path` location such as
/// `registry.json5:source.dir`; cross-field invariants use `Invalid`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The registry config file could not be read.
    #[error("failed to read registry config: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// The file is not valid JSON5.
    #[error("failed to parse registry config: {0}")]
    ParseFailed(#[from] json5::Error),
    /// The document passed schema checks but does not map onto the model.
    #[error("failed to decode registry config: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// A field has the wrong shape or an out-of-range value.
    #[error("invalid registry config at {path}: {message}")]
    InvalidField { path: String, message: String },
    /// A setting violates an invariant checked after decoding.
    #[error("invalid registry config: {0}")]
    Invalid(String),
}
