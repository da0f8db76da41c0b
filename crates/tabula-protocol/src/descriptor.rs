use std::fmt;

/// Identity of a category type: the short name used as registry key and the
/// fully-qualified name used for single-blob fetches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor {
    /// Short name, unique within a registry.
    pub name: String,
    /// Fully-qualified name, e.g. `game.config.ItemCategory`.
    pub full_name: String,
}

impl TypeDescriptor {
    /// Create a descriptor from explicit short and full names.
    pub fn new(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
        }
    }

    /// Create a descriptor whose short name is the last `.` segment.
    pub fn from_full_name(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let name = Self::short_name_of(&full_name).to_string();
        Self { name, full_name }
    }

    /// Last `.`-separated segment of a fully-qualified type name.
    pub fn short_name_of(full_name: &str) -> &str {
        full_name.rsplit('.').next().unwrap_or(full_name)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}
