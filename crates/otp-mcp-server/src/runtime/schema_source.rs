use std::path::PathBuf;

use apollo_compiler::{Schema, validation::Valid};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::errors::ServerError;

/// Source for the GraphQL schema to subset
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SchemaSource {
    /// Load the schema from an SDL file on disk
    Local { path: PathBuf },

    /// Use SDL embedded in the config
    Inline { sdl: String },
}

impl SchemaSource {
    /// Read, parse and validate the schema
    pub async fn load(&self) -> Result<Valid<Schema>, ServerError> {
        let (sdl, name) = match self {
            SchemaSource::Local { path } => {
                let sdl = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| ServerError::ReadFile {
                        path: Some(path.display().to_string()),
                        source,
                    })?;
                (sdl, path.display().to_string())
            }
            SchemaSource::Inline { sdl } => (sdl.clone(), "schema.graphql".to_string()),
        };

        let schema = Schema::parse_and_validate(sdl, &name)
            .map_err(|errors| ServerError::GraphQLSchema(Box::new(errors)))?;
        info!(
            source = %name,
            types = schema.types.len(),
            "Loaded GraphQL schema"
        );
        Ok(schema)
    }
}
