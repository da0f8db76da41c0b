use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use tabula_protocol::{BlobMap, ByteProvider, ProviderError, TypeCatalog, TypeDescriptor};

/// In-memory byte provider that counts fetches.
#[derive(Debug, Default)]
pub struct CountingByteProvider {
    blobs: RwLock<BlobMap>,
    fetch_all_calls: AtomicUsize,
    fetch_one_calls: AtomicUsize,
}

impl CountingByteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(self, name: &str, bytes: Vec<u8>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&self, name: &str, bytes: Vec<u8>) {
        self.blobs.write().insert(name.to_string(), bytes);
    }

    pub fn remove(&self, name: &str) {
        self.blobs.write().remove(name);
    }

    pub fn fetch_all_calls(&self) -> usize {
        self.fetch_all_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_one_calls(&self) -> usize {
        self.fetch_one_calls.load(Ordering::SeqCst)
    }
}

impl ByteProvider for CountingByteProvider {
    fn fetch_all(&self) -> Result<BlobMap, ProviderError> {
        self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.blobs.read().clone())
    }

    /// Keys are short names; a fully-qualified request is matched by its last segment.
    fn fetch_one(&self, name: &str) -> Result<Vec<u8>, ProviderError> {
        self.fetch_one_calls.fetch_add(1, Ordering::SeqCst);
        let short = TypeDescriptor::short_name_of(name);
        self.blobs
            .read()
            .get(short)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(name.to_string()))
    }
}

/// Catalog that always fails discovery.
#[derive(Debug, Default)]
pub struct FailingCatalog;

impl TypeCatalog for FailingCatalog {
    fn discover(&self, marker: &str) -> Result<Vec<TypeDescriptor>, ProviderError> {
        Err(ProviderError::Discovery(format!(
            "catalog unavailable for marker {marker}"
        )))
    }
}
