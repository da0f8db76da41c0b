//! Builder wiring config, constructors, and collaborators into a registry.

use crate::error::RegistryError;
use crate::factory::CategoryFactory;
use crate::registry::ConfigRegistry;
use crate::sources::DirectoryByteProvider;
use log::info;
use std::sync::Arc;
use tabula_config::{ConfigError, RegistryConfig};
use tabula_protocol::{ByteProvider, ConfigCategory, TypeCatalog};

/// Builder for [`ConfigRegistry`].
///
/// Without an explicit catalog, every type registered with the factory is
/// discovered under the configured marker. Without an explicit provider,
/// blobs are read from the configured `source` directory.
#[derive(Default)]
pub struct RegistryBuilder {
    config: RegistryConfig,
    factory: CategoryFactory,
    catalog: Option<Arc<dyn TypeCatalog>>,
    provider: Option<Arc<dyn ByteProvider>>,
}

impl RegistryBuilder {
    /// Create a builder with default config and an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the registry config.
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the constructor table.
    pub fn factory(mut self, factory: CategoryFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Register a typed category constructor.
    pub fn category<T: ConfigCategory>(mut self) -> Self {
        self.factory.register_category::<T>();
        self
    }

    /// Use an explicit type catalog.
    pub fn catalog(mut self, catalog: Arc<dyn TypeCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Use an explicit byte provider.
    pub fn provider(mut self, provider: Arc<dyn ByteProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Validate the config and assemble the registry.
    pub fn build(self) -> Result<ConfigRegistry, RegistryError> {
        self.config.validate()?;
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Arc::new(self.factory.catalog(&self.config.marker)),
        };
        let provider = match (self.provider, &self.config.source) {
            (Some(provider), _) => provider,
            (None, Some(source)) => {
                info!("using directory blob source (dir={})", source.dir.display());
                Arc::new(DirectoryByteProvider::from_config(source))
            }
            (None, None) => {
                return Err(ConfigError::Invalid(
                    "no byte provider supplied and no source configured".to_string(),
                )
                .into());
            }
        };
        Ok(ConfigRegistry::new(
            self.config,
            self.factory,
            catalog,
            provider,
        ))
    }
}
