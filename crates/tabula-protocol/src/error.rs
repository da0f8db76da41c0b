/// Errors raised by category implementations while constructing or linking.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Blob contents could not be decoded.
    #[error("malformed category data: {0}")]
    Malformed(String),
    /// No blob was supplied for the category.
    #[error("missing bytes for category: {0}")]
    MissingBytes(String),
    /// A cross-reference named a category that is not loaded.
    #[error("category {category} references unknown category {reference}")]
    DanglingReference { category: String, reference: String },
    /// Decoded data violates a category invariant.
    #[error("invalid category: {0}")]
    Invalid(String),
}

/// Errors returned by byte providers and type catalogs.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No blob exists under the requested name.
    #[error("blob not found: {0}")]
    NotFound(String),
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Type discovery failed or produced an inconsistent set.
    #[error("discovery failed: {0}")]
    Discovery(String),
    /// Provider-specific failure.
    #[error("provider failed: {0}")]
    Other(String),
}
