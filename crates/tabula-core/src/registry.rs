//! Category registry with two-phase load and cross-category resolution.
//!
//! A full load discovers every participating type, fetches all blobs in one
//! batched request, constructs each category (on the caller's thread or
//! across blocking tasks), and only then runs the register/resolve pass over
//! the complete map.

use crate::builder::RegistryBuilder;
use crate::error::RegistryError;
use crate::factory::CategoryFactory;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tabula_config::{LoadMode, RegistryConfig};
use tabula_protocol::{
    AsAnyArc, BlobMap, ByteProvider, Category, CategoryMap, CategorySet, ConfigCategory,
    TypeCatalog, TypeDescriptor,
};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Process-wide store of live categories keyed by short type name.
///
/// Loads take `&mut self`, so overlapping loads are ruled out by the borrow
/// checker; lookups between loads need no locking.
pub struct ConfigRegistry {
    config: RegistryConfig,
    factory: Arc<CategoryFactory>,
    catalog: Arc<dyn TypeCatalog>,
    provider: Arc<dyn ByteProvider>,
    categories: CategoryMap,
}

impl fmt::Debug for ConfigRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigRegistry")
            .field("config", &self.config)
            .field("categories", &self.names())
            .finish()
    }
}

impl ConfigRegistry {
    /// Create an empty registry over the given collaborators.
    pub fn new(
        config: RegistryConfig,
        factory: CategoryFactory,
        catalog: Arc<dyn TypeCatalog>,
        provider: Arc<dyn ByteProvider>,
    ) -> Self {
        Self {
            config,
            factory: Arc::new(factory),
            catalog,
            provider,
            categories: CategoryMap::new(),
        }
    }

    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Active registry config.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Rebuild every category on the caller's thread.
    ///
    /// Previously loaded categories are destroyed first. On failure the
    /// registry is left empty.
    pub fn load(&mut self) -> Result<(), RegistryError> {
        self.destroy_all();
        let (types, blobs) = self.prepare()?;
        info!("loading categories (mode=sequential, count={})", types.len());

        let mut staged = CategoryMap::with_capacity(types.len());
        for descriptor in &types {
            let category = construct_from_blobs(&self.factory, descriptor, &blobs)?;
            staged.insert(descriptor.name.clone(), category);
        }
        self.commit(staged)
    }

    /// Rebuild every category, constructing them concurrently.
    ///
    /// One blocking task per type runs against the shared bulk blob map; the
    /// register/resolve pass starts only after every task has finished. The
    /// first construction failure aborts the remaining tasks and is returned.
    /// An invalid config is rejected before anything is destroyed.
    pub async fn load_async(&mut self) -> Result<(), RegistryError> {
        self.config.validate()?;
        self.destroy_all();
        let (types, blobs) = self.prepare()?;
        let max_parallel = self.config.effective_max_parallel();
        info!(
            "loading categories (mode=parallel, count={}, max_parallel={})",
            types.len(),
            max_parallel
        );

        let blobs = Arc::new(blobs);
        let staged = Arc::new(Mutex::new(CategoryMap::with_capacity(types.len())));
        let permits = Arc::new(Semaphore::new(max_parallel));
        let mut tasks = JoinSet::new();
        for descriptor in types {
            let permit = Arc::clone(&permits)
                .acquire_owned()
                .await
                .map_err(|err| RegistryError::Task(err.to_string()))?;
            let factory = Arc::clone(&self.factory);
            let blobs = Arc::clone(&blobs);
            let staged = Arc::clone(&staged);
            tasks.spawn_blocking(move || {
                let _permit = permit;
                let category = construct_from_blobs(&factory, &descriptor, &blobs)?;
                staged.lock().insert(descriptor.name, category);
                Ok::<(), RegistryError>(())
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(|err| RegistryError::Task(err.to_string()))
                .and_then(|result| result);
            if let Err(err) = outcome {
                warn!("parallel category load failed: {err}");
                tasks.shutdown().await;
                return Err(err);
            }
        }

        let staged = std::mem::take(&mut *staged.lock());
        self.commit(staged)
    }

    /// Full reload using the configured load mode.
    pub async fn reload(&mut self) -> Result<(), RegistryError> {
        match self.config.load_mode {
            LoadMode::Sequential => self.load(),
            LoadMode::Parallel => self.load_async().await,
        }
    }

    /// Load or replace a single category.
    ///
    /// The blob is fetched by the type's fully-qualified name. The new
    /// instance is registered and resolved against the current map before
    /// it replaces the previous one, which is then destroyed. On failure the
    /// registry is unchanged.
    pub fn load_one(
        &mut self,
        descriptor: &TypeDescriptor,
    ) -> Result<Arc<dyn Category>, RegistryError> {
        let category = self.stage_one(descriptor)?;
        self.install_one(descriptor, Arc::clone(&category));
        Ok(category)
    }

    /// Typed variant of [`ConfigRegistry::load_one`].
    ///
    /// The concrete type is checked before the new instance is installed, so
    /// a mismatch also leaves the registry unchanged.
    pub fn load_one_as<T: ConfigCategory>(&mut self) -> Result<Arc<T>, RegistryError> {
        let descriptor = T::descriptor();
        let category = self.stage_one(&descriptor)?;
        let typed = match Arc::clone(&category).as_any_arc().downcast::<T>() {
            Ok(typed) => typed,
            Err(_) => {
                warn!(
                    "discarding category with unexpected type (name={})",
                    descriptor.name
                );
                category.destroy();
                return Err(RegistryError::TypeMismatch(T::NAME.to_string()));
            }
        };
        self.install_one(&descriptor, category);
        Ok(typed)
    }

    /// Apply `translator(key, text)` to every loaded category once.
    pub fn translate_text<F>(&self, translator: F)
    where
        F: Fn(&str, &str) -> String,
    {
        debug!("translating categories (count={})", self.categories.len());
        for category in self.categories.values() {
            category.translate_text(&translator);
        }
    }

    /// Destroy every category and empty the registry.
    pub fn destroy(&mut self) {
        self.destroy_all();
    }

    /// Fetch a category by short name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Category>> {
        self.categories.get(name).cloned()
    }

    /// Fetch a category by its static type.
    pub fn get_as<T: ConfigCategory>(&self) -> Option<Arc<T>> {
        self.snapshot().get_as::<T>()
    }

    /// Whether a category with this name is loaded.
    pub fn contains(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Sorted names of loaded categories.
    pub fn names(&self) -> Vec<String> {
        self.snapshot().names()
    }

    /// Number of loaded categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether no categories are loaded.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Read-only view of the loaded categories.
    pub fn snapshot(&self) -> CategorySet<'_> {
        CategorySet::new(&self.categories)
    }

    /// Discover participating types and fetch their blobs in one request.
    fn prepare(&self) -> Result<(Vec<TypeDescriptor>, BlobMap), RegistryError> {
        let types = self
            .catalog
            .discover(&self.config.marker)
            .map_err(RegistryError::Discovery)?;
        let mut seen = HashSet::with_capacity(types.len());
        for descriptor in &types {
            if !seen.insert(descriptor.name.as_str()) {
                return Err(RegistryError::DuplicateType(descriptor.name.clone()));
            }
        }
        debug!(
            "discovered category types (marker={}, count={})",
            self.config.marker,
            types.len()
        );

        let blobs = self.provider.fetch_all().map_err(RegistryError::Fetch)?;
        if let Some(missing) = types
            .iter()
            .find(|descriptor| !blobs.contains_key(&descriptor.name))
        {
            return Err(RegistryError::MissingBlob(missing.name.clone()));
        }
        Ok((types, blobs))
    }

    /// Fetch, construct, register, and resolve one category without touching
    /// the live map.
    fn stage_one(&self, descriptor: &TypeDescriptor) -> Result<Arc<dyn Category>, RegistryError> {
        info!(
            "loading category (name={}, full_name={})",
            descriptor.name, descriptor.full_name
        );
        let bytes = self
            .provider
            .fetch_one(&descriptor.full_name)
            .map_err(RegistryError::Fetch)?;
        let category = self.factory.construct(descriptor, Some(bytes.as_slice()))?;
        category
            .register()
            .map_err(|source| RegistryError::Register {
                name: descriptor.name.clone(),
                source,
            })?;

        let mut next = self.categories.clone();
        next.insert(descriptor.name.clone(), Arc::clone(&category));
        category
            .resolve(&CategorySet::new(&next))
            .map_err(|source| RegistryError::Resolve {
                name: descriptor.name.clone(),
                source,
            })?;
        Ok(category)
    }

    fn install_one(&mut self, descriptor: &TypeDescriptor, category: Arc<dyn Category>) {
        if let Some(previous) = self.categories.insert(descriptor.name.clone(), category) {
            debug!("destroying replaced category (name={})", descriptor.name);
            previous.destroy();
        }
    }

    /// Install constructed categories and run the register/resolve pass.
    fn commit(&mut self, staged: CategoryMap) -> Result<(), RegistryError> {
        self.categories = staged;
        if let Err(err) = self.register_and_resolve() {
            warn!("category resolution failed: {err}");
            self.destroy_all();
            return Err(err);
        }
        info!("categories loaded (count={})", self.categories.len());
        Ok(())
    }

    fn register_and_resolve(&self) -> Result<(), RegistryError> {
        let snapshot = self.snapshot();
        for (name, category) in &self.categories {
            category
                .register()
                .map_err(|source| RegistryError::Register {
                    name: name.clone(),
                    source,
                })?;
            category
                .resolve(&snapshot)
                .map_err(|source| RegistryError::Resolve {
                    name: name.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    fn destroy_all(&mut self) {
        if self.categories.is_empty() {
            return;
        }
        info!("destroying categories (count={})", self.categories.len());
        for (_, category) in self.categories.drain() {
            category.destroy();
        }
    }
}

impl Drop for ConfigRegistry {
    fn drop(&mut self) {
        self.destroy_all();
    }
}

fn construct_from_blobs(
    factory: &CategoryFactory,
    descriptor: &TypeDescriptor,
    blobs: &BlobMap,
) -> Result<Arc<dyn Category>, RegistryError> {
    let bytes = blobs.get(&descriptor.name).map(Vec::as_slice);
    factory.construct(descriptor, bytes)
}
