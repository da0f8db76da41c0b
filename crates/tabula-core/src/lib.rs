//! Typed configuration registry.
//!
//! This crate owns the category factory, the registry with its sequential and
//! parallel two-phase loads, and the built-in byte sources and type catalog.

pub mod builder;
pub mod error;
pub mod factory;
pub mod registry;
pub mod sources;

pub use builder::RegistryBuilder;
pub use error::{ErrorKind, RegistryError};
pub use factory::CategoryFactory;
pub use registry::ConfigRegistry;
/// Built-in byte providers and type catalog.
pub use sources::{DirectoryByteProvider, MemoryByteProvider, StaticTypeCatalog};
