use std::sync::Arc;

use otp_schema_subset::{SubschemaCache, SubschemaError, SubschemaStore};

use crate::schema_tool::SchemaTool;

/// A started server with every category subschema built
pub struct Running {
    pub(super) store: Arc<SubschemaStore>,
    pub(super) cache: Arc<SubschemaCache>,
    pub(super) schema_tool: SchemaTool,
}

impl Running {
    pub fn store(&self) -> &Arc<SubschemaStore> {
        &self.store
    }

    pub fn cache(&self) -> &SubschemaCache {
        &self.cache
    }

    pub fn schema_tool(&self) -> &SchemaTool {
        &self.schema_tool
    }

    /// Combined SDL of the given categories
    pub fn lookup<S: AsRef<str>>(&self, categories: &[S]) -> Result<String, SubschemaError> {
        self.store.lookup(categories)
    }
}
