use parking_lot::RwLock;
use tabula_protocol::{BlobMap, ByteProvider, ProviderError, TypeDescriptor};

/// In-memory byte provider keyed by short type name.
#[derive(Debug, Default)]
pub struct MemoryByteProvider {
    blobs: RwLock<BlobMap>,
}

impl MemoryByteProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a blob, builder style.
    pub fn with_blob(self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Insert or replace a blob.
    pub fn insert(&self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.blobs.write().insert(name.into(), bytes.into());
    }

    /// Remove a blob, returning its bytes.
    pub fn remove(&self, name: &str) -> Option<Vec<u8>> {
        self.blobs.write().remove(name)
    }
}

impl From<BlobMap> for MemoryByteProvider {
    fn from(blobs: BlobMap) -> Self {
        Self {
            blobs: RwLock::new(blobs),
        }
    }
}

impl ByteProvider for MemoryByteProvider {
    fn fetch_all(&self) -> Result<BlobMap, ProviderError> {
        Ok(self.blobs.read().clone())
    }

    /// Look up `name` as given, then by its short name.
    fn fetch_one(&self, name: &str) -> Result<Vec<u8>, ProviderError> {
        let blobs = self.blobs.read();
        blobs
            .get(name)
            .or_else(|| blobs.get(TypeDescriptor::short_name_of(name)))
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryByteProvider;
    use pretty_assertions::assert_eq;
    use tabula_protocol::{ByteProvider, ProviderError};

    #[test]
    fn fetch_one_accepts_full_and_short_names() {
        let provider = MemoryByteProvider::new().with_blob("Items", b"items".to_vec());
        assert_eq!(provider.fetch_one("Items").expect("short"), b"items".to_vec());
        assert_eq!(
            provider.fetch_one("game.config.Items").expect("full"),
            b"items".to_vec()
        );
        assert!(matches!(
            provider.fetch_one("game.config.Units"),
            Err(ProviderError::NotFound(name)) if name == "game.config.Units"
        ));
    }

    #[test]
    fn fetch_all_reflects_updates() {
        let provider = MemoryByteProvider::new().with_blob("Items", b"a".to_vec());
        provider.insert("Units", b"b".to_vec());
        provider.remove("Items");
        let blobs = provider.fetch_all().expect("fetch");
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs.get("Units"), Some(&b"b".to_vec()));
    }
}
