use crate::errors::McpError;
use crate::schema_from_type;
use otp_schema_subset::{CategoryRegistry, SubschemaError, SubschemaStore};
use rmcp::model::{CallToolResult, Content, ErrorCode, Tool};
use rmcp::schemars::JsonSchema;
use rmcp::serde_json::Value;
use rmcp::{schemars, serde_json};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// The name of the tool returning category subschemas
pub const SCHEMA_TOOL_NAME: &str = "get_open_targets_graphql_schema";

/// A tool to get the part of the GraphQL schema relevant to some categories
#[derive(Clone)]
pub struct SchemaTool {
    store: Arc<SubschemaStore>,
    pub tool: Tool,
}

/// Input for the schema tool.
#[derive(JsonSchema, Deserialize)]
pub struct Input {
    /// List of category names to filter the schema. Returns only types relevant to the
    /// specified categories.
    pub categories: Vec<String>,
}

impl SchemaTool {
    pub fn new(store: Arc<SubschemaStore>, registry: &CategoryRegistry) -> Self {
        Self {
            store,
            tool: Tool::new(
                SCHEMA_TOOL_NAME,
                format!(
                    "Retrieve the Open Targets Platform GraphQL schema by category. {}",
                    registry.summary()
                ),
                schema_from_type!(Input),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        if input.categories.is_empty() {
            return Err(McpError::new(
                ErrorCode::INVALID_PARAMS,
                format!(
                    "At least one category is required. Available categories: {}",
                    self.available()
                ),
                None,
            ));
        }

        debug!(categories = ?input.categories, "Looking up category subschemas");
        let sdl = self.store.lookup(&input.categories).map_err(|e| match e {
            SubschemaError::UnknownCategory { .. } => {
                McpError::new(ErrorCode::INVALID_PARAMS, e.to_string(), None)
            }
            _ => McpError::new(ErrorCode::INTERNAL_ERROR, e.to_string(), None),
        })?;

        Ok(CallToolResult::success(vec![Content::text(sdl)]))
    }

    fn available(&self) -> String {
        self.store
            .list_category_names()
            .map(|names| names.join(", "))
            .unwrap_or_default()
    }
}
