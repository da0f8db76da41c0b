//! Test helpers shared across Tabula crates.

pub mod fixtures;
pub mod lifecycle;
pub mod providers;
pub mod table;

pub use fixtures::{Items, Recipes, items_blob, recipes_blob};
pub use lifecycle::{Hook, LifecycleLog};
pub use providers::{CountingByteProvider, FailingCatalog};
pub use table::{ResolvedRef, TestTable, slow_table_blob, table_blob, table_constructor};
