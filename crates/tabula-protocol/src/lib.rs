//! Shared contract types between category implementations, data sources,
//! and the registry.

mod category;
mod descriptor;
mod error;
mod provider;

pub use category::{AsAnyArc, Category, CategoryMap, CategorySet, ConfigCategory};
pub use descriptor::TypeDescriptor;
pub use error::{CategoryError, ProviderError};
pub use provider::{BlobMap, ByteProvider, TypeCatalog};
