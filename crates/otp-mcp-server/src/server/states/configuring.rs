use std::sync::Arc;

use apollo_compiler::{Schema, validation::Valid};
use otp_schema_subset::{CategoryRegistry, DepthLimit, SubschemaStore};
use tracing::debug;

use crate::errors::ServerError;
use crate::schema_tool::SchemaTool;

use super::Running;

/// Collects what the subschema build needs before anything is served
pub(crate) struct Configuring {
    registry: CategoryRegistry,
    depth: DepthLimit,
    schema: Option<Valid<Schema>>,
}

impl Configuring {
    pub(crate) fn new(registry: CategoryRegistry, depth: DepthLimit) -> Self {
        Self {
            registry,
            depth,
            schema: None,
        }
    }

    pub(crate) fn set_schema(self, schema: Valid<Schema>) -> Self {
        debug!(types = schema.types.len(), "Received schema");
        Self {
            schema: Some(schema),
            ..self
        }
    }

    /// Build every category subschema and hand out the lookup surface
    pub(crate) async fn start(self) -> Result<Running, ServerError> {
        let schema = self.schema.ok_or(ServerError::NoSchema)?;

        let store = Arc::new(SubschemaStore::new());
        let cache = store
            .prefetch(Some(Arc::new(schema)), &self.registry, self.depth)
            .await?;
        let schema_tool = SchemaTool::new(store.clone(), &self.registry);

        Ok(Running {
            store,
            cache,
            schema_tool,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SCHEMA: &str = include_str!("../../testdata/schema.graphql");
    const TEST_CATEGORIES: &str = include_str!("../../testdata/categories.json");

    fn registry() -> CategoryRegistry {
        CategoryRegistry::from_json(TEST_CATEGORIES).unwrap()
    }

    #[tokio::test]
    async fn starting_without_a_schema_fails() {
        let result = Configuring::new(registry(), DepthLimit::default())
            .start()
            .await;

        assert!(matches!(result, Err(ServerError::NoSchema)));
    }

    #[tokio::test]
    async fn starting_publishes_the_cache() {
        let schema = Schema::parse_and_validate(TEST_SCHEMA, "schema.graphql").unwrap();

        let running = Configuring::new(registry(), DepthLimit::Exhaustive)
            .set_schema(schema)
            .start()
            .await
            .unwrap();

        assert!(running.store().is_ready());
        assert_eq!(running.cache().depth(), DepthLimit::Exhaustive);
        assert!(Arc::ptr_eq(
            running.store().snapshot().unwrap(),
            &running.cache
        ));
    }
}
