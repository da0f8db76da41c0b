//! Error types for the registry crate.

use tabula_config::ConfigError;
use tabula_protocol::{CategoryError, ProviderError};
use thiserror::Error;

/// Errors returned by registry loads and construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Type discovery failed.
    #[error("discovery failed: {0}")]
    Discovery(#[source] ProviderError),
    /// Discovery returned the same short name twice.
    #[error("duplicate category name: {0}")]
    DuplicateType(String),
    /// The byte provider failed.
    #[error("failed to fetch category bytes: {0}")]
    Fetch(#[source] ProviderError),
    /// The bulk fetch did not include a discovered type.
    #[error("no bytes supplied for category: {0}")]
    MissingBlob(String),
    /// No constructor is registered for the type.
    #[error("no constructor registered for category: {0}")]
    UnknownType(String),
    /// Constructing a category from its bytes failed.
    #[error("failed to construct category {name}: {source}")]
    Construction {
        name: String,
        #[source]
        source: CategoryError,
    },
    /// A constructed category is not of the requested concrete type.
    #[error("category {0} has an unexpected concrete type")]
    TypeMismatch(String),
    /// A category's register hook failed.
    #[error("failed to register category {name}: {source}")]
    Register {
        name: String,
        #[source]
        source: CategoryError,
    },
    /// A category's resolve hook failed.
    #[error("failed to resolve category {name}: {source}")]
    Resolve {
        name: String,
        #[source]
        source: CategoryError,
    },
    /// A parallel construction task panicked or was cancelled.
    #[error("construction task failed: {0}")]
    Task(String),
    /// Registry config is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Coarse classification of registry failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Discovery,
    Fetch,
    Construction,
    Resolve,
    Config,
}

impl RegistryError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Discovery(_) | Self::DuplicateType(_) => ErrorKind::Discovery,
            Self::Fetch(_) | Self::MissingBlob(_) => ErrorKind::Fetch,
            Self::UnknownType(_)
            | Self::Construction { .. }
            | Self::TypeMismatch(_)
            | Self::Register { .. }
            | Self::Task(_) => ErrorKind::Construction,
            Self::Resolve { .. } => ErrorKind::Resolve,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}
