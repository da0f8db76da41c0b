//! Built-in byte providers and type catalog.

mod catalog;
mod directory;
mod memory;

pub use catalog::StaticTypeCatalog;
pub use directory::DirectoryByteProvider;
pub use memory::MemoryByteProvider;
