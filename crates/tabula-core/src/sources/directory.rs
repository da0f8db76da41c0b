use log::{debug, info};
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};
use tabula_config::SourceConfig;
use tabula_protocol::{BlobMap, ByteProvider, ProviderError, TypeDescriptor};
use walkdir::WalkDir;

/// Byte provider reading one `<type name>.<extension>` file per category.
#[derive(Debug, Clone)]
pub struct DirectoryByteProvider {
    root: PathBuf,
    extension: String,
    recursive: bool,
}

impl DirectoryByteProvider {
    /// Provider over `root` reading files with `extension` (no leading dot).
    pub fn new(root: impl AsRef<Path>, extension: impl Into<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: extension.into(),
            recursive: false,
        }
    }

    /// Provider configured from a `source` config block.
    pub fn from_config(source: &SourceConfig) -> Self {
        Self::new(&source.dir, source.extension.clone()).recursive(source.recursive)
    }

    /// Also walk nested directories.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Root directory of the blobs.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Blob files under the root, paired with the name they are keyed by.
    fn blob_files(&self) -> Result<Vec<(String, PathBuf)>, ProviderError> {
        if !self.root.is_dir() {
            return Err(ProviderError::NotFound(self.root.display().to_string()));
        }
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .max_depth(max_depth)
        {
            let entry = entry.map_err(|err| ProviderError::Other(err.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            files.push((stem.to_string(), path));
        }
        Ok(files)
    }
}

impl ByteProvider for DirectoryByteProvider {
    fn fetch_all(&self) -> Result<BlobMap, ProviderError> {
        let mut blobs = BlobMap::new();
        for (name, path) in self.blob_files()? {
            let bytes = std::fs::read(&path)?;
            match blobs.entry(name) {
                Entry::Occupied(entry) => {
                    return Err(ProviderError::Other(format!(
                        "duplicate blob {} at {}",
                        entry.key(),
                        path.display()
                    )));
                }
                Entry::Vacant(entry) => {
                    debug!("read blob (path={}, bytes={})", path.display(), bytes.len());
                    entry.insert(bytes);
                }
            }
        }
        info!(
            "fetched category blobs (root={}, count={})",
            self.root.display(),
            blobs.len()
        );
        Ok(blobs)
    }

    /// Look up `<name>.<ext>` then `<short name>.<ext>`.
    ///
    /// Names must be a single file stem; anything that could address a path
    /// outside the root is rejected.
    fn fetch_one(&self, name: &str) -> Result<Vec<u8>, ProviderError> {
        if !is_plain_name(name) {
            return Err(ProviderError::Other(format!("invalid blob name: {name:?}")));
        }
        let candidates = [name, TypeDescriptor::short_name_of(name)];
        for candidate in candidates {
            let path = self.root.join(format!("{candidate}.{}", self.extension));
            if path.is_file() {
                debug!("read blob (path={})", path.display());
                return Ok(std::fs::read(path)?);
            }
        }
        if self.recursive {
            for (stem, path) in self.blob_files()? {
                if candidates.contains(&stem.as_str()) {
                    debug!("read blob (path={})", path.display());
                    return Ok(std::fs::read(path)?);
                }
            }
        }
        Err(ProviderError::NotFound(name.to_string()))
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
