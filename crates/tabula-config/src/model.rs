//! Configuration schema for the category registry.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Default marker passed to type discovery.
pub const DEFAULT_MARKER: &str = "config";
/// Default file extension for category blobs on disk.
pub const DEFAULT_BLOB_EXTENSION: &str = "bytes";
/// Upper bound accepted for `max_parallel`.
pub const MAX_PARALLEL_LIMIT: usize = 4096;

/// Root config for a category registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    /// Marker used to discover participating category types.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Strategy used by full reloads.
    #[serde(default)]
    pub load_mode: LoadMode,
    /// Upper bound on concurrently running construction tasks.
    #[serde(default)]
    pub max_parallel: Option<usize>,
    /// Optional on-disk blob source.
    #[serde(default)]
    pub source: Option<SourceConfig>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            schema: None,
            marker: default_marker(),
            load_mode: LoadMode::default(),
            max_parallel: None,
            source: None,
        }
    }
}

impl RegistryConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> RegistryConfigBuilder {
        RegistryConfigBuilder::new()
    }

    /// Effective parallelism for construction tasks.
    ///
    /// Falls back to the host's available parallelism when unset. Always
    /// within `1..=MAX_PARALLEL_LIMIT`, even for configs that skipped
    /// validation.
    pub fn effective_max_parallel(&self) -> usize {
        self.max_parallel
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(NonZeroUsize::get)
                    .unwrap_or(1)
            })
            .clamp(1, MAX_PARALLEL_LIMIT)
    }
}

/// Builder for assembling a `RegistryConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct RegistryConfigBuilder {
    config: RegistryConfig,
}

impl RegistryConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: RegistryConfig::default(),
        }
    }

    /// Override the discovery marker.
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.config.marker = marker.into();
        self
    }

    /// Select the full reload strategy.
    pub fn load_mode(mut self, load_mode: LoadMode) -> Self {
        self.config.load_mode = load_mode;
        self
    }

    /// Cap concurrently running construction tasks.
    pub fn max_parallel(mut self, max_parallel: usize) -> Self {
        self.config.max_parallel = Some(max_parallel);
        self
    }

    /// Read category blobs from a directory.
    pub fn source(mut self, source: SourceConfig) -> Self {
        self.config.source = Some(source);
        self
    }

    /// Finalize the builder and return the config.
    pub fn build(self) -> RegistryConfig {
        self.config
    }
}

/// How a full reload constructs categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Construct every category on the caller's thread.
    Sequential,
    /// Construct categories concurrently, one task per type.
    #[default]
    Parallel,
}

/// On-disk blob source settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Directory holding one blob file per category.
    pub dir: PathBuf,
    /// File extension of blob files, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Walk nested directories as well.
    #[serde(default)]
    pub recursive: bool,
}

impl SourceConfig {
    /// Source rooted at `dir` with default extension and no recursion.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: default_extension(),
            recursive: false,
        }
    }
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_extension() -> String {
    DEFAULT_BLOB_EXTENSION.to_string()
}
