use bon::bon;
use otp_schema_subset::DepthLimit;
use tracing::info;

use crate::errors::ServerError;
use crate::runtime::{CategorySource, SchemaSource};

mod states;

pub use states::Running;
use states::Configuring;

/// A server for Open Targets Platform GraphQL subschemas
pub struct Server {
    schema_source: SchemaSource,
    category_source: CategorySource,
    subschema_depth: DepthLimit,
}

#[bon]
impl Server {
    #[builder]
    pub fn new(
        schema_source: SchemaSource,
        #[builder(default)] category_source: CategorySource,
        #[builder(default)] subschema_depth: DepthLimit,
    ) -> Self {
        Self {
            schema_source,
            category_source,
            subschema_depth,
        }
    }

    /// Load the schema and categories, then build every subschema before returning.
    ///
    /// Fails without serving anything if any step fails.
    pub async fn start(self) -> Result<Running, ServerError> {
        let schema = self.schema_source.load().await?;
        let registry = self.category_source.load()?;

        let running = Configuring::new(registry, self.subschema_depth)
            .set_schema(schema)
            .start()
            .await?;
        info!(
            depth = %running.cache().depth(),
            categories = running.cache().len(),
            "Server ready"
        );
        Ok(running)
    }
}
