//! Curated topical groupings of schema types.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use itertools::Itertools as _;
use serde::Deserialize;
use tracing::debug;

use crate::error::SubschemaError;

/// The registry shipped with this crate.
const BUNDLED_CATEGORIES: &str = include_str!("../assets/categories.json");

/// A named set of seed types.
///
/// Seeds may name types missing from the schema; those are skipped when expanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub description: String,
    pub seed_types: BTreeSet<String>,
}

/// A category entry as written in the registry file
#[derive(Deserialize)]
struct RawCategory {
    description: Option<String>,
    types: Option<Vec<String>>,
}

/// All known categories, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    categories: BTreeMap<String, Category>,
}

impl CategoryRegistry {
    /// The default category definitions.
    pub fn bundled() -> Result<Self, SubschemaError> {
        Self::from_json(BUNDLED_CATEGORIES)
    }

    /// Load category definitions from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SubschemaError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "Loading category registry");
        Self::from_json(&contents)
    }

    /// Parse a `{ "<name>": { "description": "...", "types": [...] } }` mapping.
    ///
    /// Every entry must carry both a `description` and a `types` list.
    pub fn from_json(json: &str) -> Result<Self, SubschemaError> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;

        let categories = raw
            .into_iter()
            .map(|(name, value)| {
                let entry = RawCategory::deserialize(value).map_err(|e| {
                    SubschemaError::Configuration {
                        category: name.clone(),
                        reason: e.to_string(),
                    }
                })?;
                let description = entry.description.ok_or_else(|| SubschemaError::Configuration {
                    category: name.clone(),
                    reason: "missing field `description`".to_string(),
                })?;
                let types = entry.types.ok_or_else(|| SubschemaError::Configuration {
                    category: name.clone(),
                    reason: "missing field `types`".to_string(),
                })?;
                let category = Category {
                    name: name.clone(),
                    description,
                    seed_types: types.into_iter().collect(),
                };
                Ok((name, category))
            })
            .collect::<Result<BTreeMap<_, _>, SubschemaError>>()?;

        Ok(Self { categories })
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// Category names in lexical order
    pub fn names(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// One line listing every category, for tool descriptions and help text.
    pub fn summary(&self) -> String {
        format!("Available categories: {}", self.categories.keys().join(", "))
    }
}
