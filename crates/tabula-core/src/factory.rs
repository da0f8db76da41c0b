//! Constructor table mapping category names to decoders.

use crate::error::RegistryError;
use crate::sources::StaticTypeCatalog;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tabula_protocol::{Category, CategoryError, ConfigCategory, TypeDescriptor};

type Constructor = Arc<dyn Fn(&[u8]) -> Result<Arc<dyn Category>, CategoryError> + Send + Sync>;

#[derive(Clone)]
struct Registration {
    descriptor: TypeDescriptor,
    constructor: Constructor,
}

/// Explicit registration table of category constructors keyed by short name.
#[derive(Clone, Default)]
pub struct CategoryFactory {
    registrations: HashMap<String, Registration>,
}

impl fmt::Debug for CategoryFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryFactory")
            .field("types", &self.descriptors())
            .finish()
    }
}

impl CategoryFactory {
    /// Create an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for `descriptor`, replacing any previous one.
    pub fn register<F>(&mut self, descriptor: TypeDescriptor, constructor: F) -> &mut Self
    where
        F: Fn(&[u8]) -> Result<Arc<dyn Category>, CategoryError> + Send + Sync + 'static,
    {
        debug!(
            "registering category constructor (name={}, full_name={})",
            descriptor.name, descriptor.full_name
        );
        self.registrations.insert(
            descriptor.name.clone(),
            Registration {
                descriptor,
                constructor: Arc::new(constructor),
            },
        );
        self
    }

    /// Register a typed category using its static identity and decoder.
    pub fn register_category<T: ConfigCategory>(&mut self) -> &mut Self {
        self.register(T::descriptor(), |bytes| {
            let category: Arc<dyn Category> = Arc::new(T::from_bytes(bytes)?);
            Ok(category)
        })
    }

    /// Whether a constructor is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.registrations.contains_key(name)
    }

    /// Registered descriptors, sorted by name.
    pub fn descriptors(&self) -> Vec<TypeDescriptor> {
        let mut descriptors = self
            .registrations
            .values()
            .map(|registration| registration.descriptor.clone())
            .collect::<Vec<_>>();
        descriptors.sort();
        descriptors
    }

    /// Catalog exposing every registered type under `marker`.
    pub fn catalog(&self, marker: &str) -> StaticTypeCatalog {
        StaticTypeCatalog::new().with_types(marker, self.descriptors())
    }

    /// Construct one category from its blob.
    ///
    /// Fails when the bytes are absent, the type has no constructor, the
    /// decoder rejects the bytes, or the result reports a different name.
    pub fn construct(
        &self,
        descriptor: &TypeDescriptor,
        bytes: Option<&[u8]>,
    ) -> Result<Arc<dyn Category>, RegistryError> {
        let registration = self
            .registrations
            .get(&descriptor.name)
            .ok_or_else(|| RegistryError::UnknownType(descriptor.name.clone()))?;
        let bytes = bytes.ok_or_else(|| RegistryError::Construction {
            name: descriptor.name.clone(),
            source: CategoryError::MissingBytes(descriptor.full_name.clone()),
        })?;
        let category =
            (registration.constructor)(bytes).map_err(|source| RegistryError::Construction {
                name: descriptor.name.clone(),
                source,
            })?;
        if category.name() != descriptor.name {
            return Err(RegistryError::Construction {
                name: descriptor.name.clone(),
                source: CategoryError::Invalid(format!(
                    "constructor produced category named {}",
                    category.name()
                )),
            });
        }
        debug!(
            "constructed category (name={}, bytes={})",
            descriptor.name,
            bytes.len()
        );
        Ok(category)
    }
}
