use otp_schema_subset::DepthLimit;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{CategorySource, SchemaSource, logging::Logging};

/// Configuration for the schema server
#[derive(Debug, Deserialize, JsonSchema)]
pub struct Config {
    /// The schema to subset
    pub schema: SchemaSource,

    /// Where the category definitions come from
    #[serde(default)]
    pub categories: CategorySource,

    /// How far to expand each category from its seed types
    #[serde(default)]
    #[schemars(schema_with = "super::schemas::depth_limit")]
    pub subschema_depth: DepthLimit,

    /// Logging configuration
    #[serde(default)]
    pub logging: Logging,
}
