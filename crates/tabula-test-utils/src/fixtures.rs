//! Typed categories with a mutual reference: recipes produce items, items
//! know which of them are craftable.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tabula_protocol::{Category, CategoryError, CategorySet, ConfigCategory};

#[derive(Debug, Serialize, Deserialize)]
struct ItemsData {
    items: BTreeMap<u32, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecipeRow {
    id: u32,
    output: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct RecipesData {
    recipes: Vec<RecipeRow>,
}

#[derive(Debug)]
pub struct Items {
    names: RwLock<BTreeMap<u32, String>>,
    craftable: RwLock<BTreeSet<u32>>,
}

impl Items {
    pub fn name_of(&self, id: u32) -> Option<String> {
        self.names.read().get(&id).cloned()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.names.read().contains_key(&id)
    }

    pub fn craftable(&self) -> Vec<u32> {
        self.craftable.read().iter().copied().collect()
    }
}

impl Category for Items {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn resolve(&self, categories: &CategorySet<'_>) -> Result<(), CategoryError> {
        let recipes = categories.require_as::<Recipes>(Self::NAME)?;
        *self.craftable.write() = recipes.rows.iter().map(|row| row.output).collect();
        Ok(())
    }

    fn translate_text(&self, translator: &dyn Fn(&str, &str) -> String) {
        for (id, name) in self.names.write().iter_mut() {
            *name = translator(&format!("Items.{id}"), name);
        }
    }
}

impl ConfigCategory for Items {
    const NAME: &'static str = "Items";
    const FULL_NAME: &'static str = "game.config.Items";

    fn from_bytes(bytes: &[u8]) -> Result<Self, CategoryError> {
        let data: ItemsData =
            serde_json::from_slice(bytes).map_err(|err| CategoryError::Malformed(err.to_string()))?;
        Ok(Self {
            names: RwLock::new(data.items),
            craftable: RwLock::new(BTreeSet::new()),
        })
    }
}

#[derive(Debug)]
pub struct Recipes {
    rows: Vec<RecipeRow>,
    outputs: RwLock<BTreeMap<u32, String>>,
}

impl Recipes {
    /// Name of the item produced by `recipe`, bound during resolve.
    pub fn output_name(&self, recipe: u32) -> Option<String> {
        self.outputs.read().get(&recipe).cloned()
    }
}

impl Category for Recipes {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn register(&self) -> Result<(), CategoryError> {
        let mut ids = BTreeSet::new();
        for row in &self.rows {
            if !ids.insert(row.id) {
                return Err(CategoryError::Invalid(format!("duplicate recipe {}", row.id)));
            }
        }
        Ok(())
    }

    fn resolve(&self, categories: &CategorySet<'_>) -> Result<(), CategoryError> {
        let items = categories.require_as::<Items>(Self::NAME)?;
        let mut outputs = BTreeMap::new();
        for row in &self.rows {
            let name = items.name_of(row.output).ok_or_else(|| {
                CategoryError::Invalid(format!(
                    "recipe {} produces unknown item {}",
                    row.id, row.output
                ))
            })?;
            outputs.insert(row.id, name);
        }
        *self.outputs.write() = outputs;
        Ok(())
    }
}

impl ConfigCategory for Recipes {
    const NAME: &'static str = "Recipes";
    const FULL_NAME: &'static str = "game.config.Recipes";

    fn from_bytes(bytes: &[u8]) -> Result<Self, CategoryError> {
        let data: RecipesData =
            serde_json::from_slice(bytes).map_err(|err| CategoryError::Malformed(err.to_string()))?;
        Ok(Self {
            rows: data.recipes,
            outputs: RwLock::new(BTreeMap::new()),
        })
    }
}

/// Encode an `Items` blob.
pub fn items_blob(items: &[(u32, &str)]) -> Vec<u8> {
    let data = ItemsData {
        items: items
            .iter()
            .map(|(id, name)| (*id, name.to_string()))
            .collect(),
    };
    serde_json::to_vec(&data).expect("encode items blob")
}

/// Encode a `Recipes` blob from `(recipe id, output item id)` pairs.
pub fn recipes_blob(recipes: &[(u32, u32)]) -> Vec<u8> {
    let data = RecipesData {
        recipes: recipes
            .iter()
            .map(|(id, output)| RecipeRow {
                id: *id,
                output: *output,
            })
            .collect(),
    };
    serde_json::to_vec(&data).expect("encode recipes blob")
}
