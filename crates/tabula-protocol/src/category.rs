//! Category capability trait and the read-only view handed to resolvers.

use crate::descriptor::TypeDescriptor;
use crate::error::CategoryError;
use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Live categories keyed by short type name.
pub type CategoryMap = HashMap<String, Arc<dyn Category>>;

/// Upcast helper so trait objects can be downcast to their concrete type.
pub trait AsAnyArc {
    /// Convert into a type-erased `Any` handle.
    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAnyArc for T {
    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// One deserialized configuration table held by the registry.
///
/// All hooks take `&self`; implementations keep mutable state behind their
/// own locks so the registry can hand out shared handles.
pub trait Category: AsAnyArc + Send + Sync + Debug {
    /// Stable type name of the category.
    fn name(&self) -> &str;

    /// Self-registration and validation hook. Must be idempotent.
    fn register(&self) -> Result<(), CategoryError> {
        Ok(())
    }

    /// Bind references to other categories.
    ///
    /// Called once every discovered category has been constructed.
    fn resolve(&self, categories: &CategorySet<'_>) -> Result<(), CategoryError> {
        let _ = categories;
        Ok(())
    }

    /// Rewrite translatable fields with `translator(key, text)`.
    fn translate_text(&self, translator: &dyn Fn(&str, &str) -> String) {
        let _ = translator;
    }

    /// Release resources before the category is replaced or torn down.
    fn destroy(&self) {}
}

/// Category type with a static identity and a byte decoder.
pub trait ConfigCategory: Category + Sized + 'static {
    /// Short name used as registry key.
    const NAME: &'static str;
    /// Fully-qualified name used for single-blob fetches.
    const FULL_NAME: &'static str = Self::NAME;

    /// Decode a category from its serialized blob.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CategoryError>;

    /// Descriptor for this category type.
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new(Self::NAME, Self::FULL_NAME)
    }
}

/// Read-only snapshot of the fully populated registry passed to `resolve`.
#[derive(Clone, Copy)]
pub struct CategorySet<'a> {
    categories: &'a CategoryMap,
}

impl<'a> CategorySet<'a> {
    /// Wrap a category map.
    pub fn new(categories: &'a CategoryMap) -> Self {
        Self { categories }
    }

    /// Fetch a category by short name.
    pub fn get(&self, name: &str) -> Option<&'a Arc<dyn Category>> {
        self.categories.get(name)
    }

    /// Fetch a category and downcast it to its concrete type.
    pub fn get_as<T: ConfigCategory>(&self) -> Option<Arc<T>> {
        let category = self.categories.get(T::NAME)?;
        Arc::clone(category).as_any_arc().downcast::<T>().ok()
    }

    /// Fetch a category referenced by `from`, failing on a dangling name.
    pub fn require(&self, from: &str, name: &str) -> Result<&'a Arc<dyn Category>, CategoryError> {
        self.get(name)
            .ok_or_else(|| CategoryError::DanglingReference {
                category: from.to_string(),
                reference: name.to_string(),
            })
    }

    /// Typed variant of [`CategorySet::require`].
    pub fn require_as<T: ConfigCategory>(&self, from: &str) -> Result<Arc<T>, CategoryError> {
        self.get_as::<T>()
            .ok_or_else(|| CategoryError::DanglingReference {
                category: from.to_string(),
                reference: T::NAME.to_string(),
            })
    }

    /// Whether a category with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Number of categories in the snapshot.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Sorted category names.
    pub fn names(&self) -> Vec<String> {
        let mut names = self.categories.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct Items {
        count: usize,
    }

    impl Category for Items {
        fn name(&self) -> &str {
            Self::NAME
        }
    }

    impl ConfigCategory for Items {
        const NAME: &'static str = "Items";
        const FULL_NAME: &'static str = "game.Items";

        fn from_bytes(bytes: &[u8]) -> Result<Self, CategoryError> {
            Ok(Self { count: bytes.len() })
        }
    }

    #[derive(Debug)]
    struct Units;

    impl Category for Units {
        fn name(&self) -> &str {
            Self::NAME
        }
    }

    impl ConfigCategory for Units {
        const NAME: &'static str = "Units";

        fn from_bytes(_bytes: &[u8]) -> Result<Self, CategoryError> {
            Ok(Self)
        }
    }

    fn sample_map() -> CategoryMap {
        let mut map = CategoryMap::new();
        map.insert(
            Items::NAME.to_string(),
            Arc::new(Items::from_bytes(b"abc").expect("items")),
        );
        map
    }

    #[test]
    fn typed_lookup_downcasts_to_concrete_category() {
        let map = sample_map();
        let set = CategorySet::new(&map);
        let items = set.get_as::<Items>().expect("items");
        assert_eq!(items.count, 3);
        assert!(set.get_as::<Units>().is_none());
        assert_eq!(set.names(), vec!["Items".to_string()]);
    }

    #[test]
    fn require_reports_dangling_reference() {
        let map = sample_map();
        let set = CategorySet::new(&map);
        assert!(set.require("Items", "Items").is_ok());
        let err = set.require_as::<Units>("Items").unwrap_err();
        assert_eq!(
            err.to_string(),
            "category Items references unknown category Units"
        );
    }

    #[test]
    fn full_name_defaults_to_short_name() {
        assert_eq!(Units::descriptor(), TypeDescriptor::new("Units", "Units"));
        assert_eq!(Items::descriptor().full_name, "game.Items");
    }
}
