//! Interfaces for the collaborators that feed the registry.

use crate::descriptor::TypeDescriptor;
use crate::error::ProviderError;
use std::collections::HashMap;

/// Raw category blobs keyed by short type name.
pub type BlobMap = HashMap<String, Vec<u8>>;

/// Source of serialized category bytes.
pub trait ByteProvider: Send + Sync {
    /// Fetch every category blob in one batched request.
    fn fetch_all(&self) -> Result<BlobMap, ProviderError>;

    /// Fetch a single blob by fully-qualified type name.
    ///
    /// Returns `ProviderError::NotFound` when no blob exists for the name.
    fn fetch_one(&self, name: &str) -> Result<Vec<u8>, ProviderError>;
}

/// Enumerates the types that participate as categories.
pub trait TypeCatalog: Send + Sync {
    /// Return every type tagged with `marker`.
    ///
    /// Must be side-effect free and return the same set for the same marker.
    fn discover(&self, marker: &str) -> Result<Vec<TypeDescriptor>, ProviderError>;
}
