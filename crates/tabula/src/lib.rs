//! Public SDK surface for Tabula.
//!
//! This crate re-exports the registry building blocks and provides a small
//! initialization helper to keep consumer setup consistent.

/// Re-export for convenience.
pub use tabula_config as config;
pub use tabula_core as core;
/// Re-export for convenience.
pub use tabula_protocol as protocol;

pub use tabula_config::{LoadMode, RegistryConfig, SourceConfig};
pub use tabula_core::{
    CategoryFactory, ConfigRegistry, DirectoryByteProvider, ErrorKind, MemoryByteProvider,
    RegistryBuilder, RegistryError, StaticTypeCatalog,
};
pub use tabula_protocol::{
    Category, CategoryError, CategorySet, ConfigCategory, TypeDescriptor,
};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
    log::debug!("tabula logging initialized");
}
