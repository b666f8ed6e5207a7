use std::path::PathBuf;

use otp_schema_subset::CategoryRegistry;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::errors::ServerError;

/// Source for the category definitions
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum CategorySource {
    /// The categories shipped with the server
    #[default]
    Bundled,

    /// A JSON file mapping category names to a description and seed types
    Local { path: PathBuf },
}

impl CategorySource {
    pub fn load(&self) -> Result<CategoryRegistry, ServerError> {
        let registry = match self {
            CategorySource::Bundled => CategoryRegistry::bundled()?,
            CategorySource::Local { path } => CategoryRegistry::from_path(path)?,
        };
        info!(categories = registry.len(), "Loaded category registry");
        Ok(registry)
    }
}
