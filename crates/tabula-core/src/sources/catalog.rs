use log::debug;
use std::collections::{HashMap, HashSet};
use tabula_protocol::{ProviderError, TypeCatalog, TypeDescriptor};

/// Fixed catalog of category types grouped by marker.
#[derive(Debug, Clone, Default)]
pub struct StaticTypeCatalog {
    types: HashMap<String, Vec<TypeDescriptor>>,
}

impl StaticTypeCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add types under `marker`.
    pub fn with_types(
        mut self,
        marker: impl Into<String>,
        types: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Self {
        self.types.entry(marker.into()).or_default().extend(types);
        self
    }

    /// Add one type under `marker`.
    pub fn insert(&mut self, marker: impl Into<String>, descriptor: TypeDescriptor) {
        self.types.entry(marker.into()).or_default().push(descriptor);
    }
}

impl TypeCatalog for StaticTypeCatalog {
    fn discover(&self, marker: &str) -> Result<Vec<TypeDescriptor>, ProviderError> {
        let Some(types) = self.types.get(marker) else {
            debug!("no types registered for marker (marker={marker})");
            return Ok(Vec::new());
        };
        let mut seen = HashSet::new();
        for descriptor in types {
            if !seen.insert(descriptor.name.as_str()) {
                return Err(ProviderError::Discovery(format!(
                    "duplicate type name {} under marker {marker}",
                    descriptor.name
                )));
            }
        }
        let mut types = types.clone();
        types.sort();
        Ok(types)
    }
}

#[cfg(test)]
mod tests {
    use super::StaticTypeCatalog;
    use pretty_assertions::assert_eq;
    use tabula_protocol::{ProviderError, TypeCatalog, TypeDescriptor};

    #[test]
    fn discover_is_sorted_and_repeatable() {
        let catalog = StaticTypeCatalog::new().with_types(
            "config",
            [
                TypeDescriptor::from_full_name("game.Units"),
                TypeDescriptor::from_full_name("game.Items"),
            ],
        );
        let first = catalog.discover("config").expect("discover");
        let second = catalog.discover("config").expect("discover");
        assert_eq!(first, second);
        assert_eq!(first[0].name, "Items");
        assert_eq!(first[1].name, "Units");
    }

    #[test]
    fn duplicate_short_names_are_inconsistent() {
        let mut catalog = StaticTypeCatalog::new();
        catalog.insert("config", TypeDescriptor::from_full_name("a.Items"));
        catalog.insert("config", TypeDescriptor::from_full_name("b.Items"));
        let err = catalog.discover("config").unwrap_err();
        assert!(matches!(err, ProviderError::Discovery(_)));
    }
}
