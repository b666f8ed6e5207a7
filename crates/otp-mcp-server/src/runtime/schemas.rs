use schemars::JsonSchema;

/// Depth accepts a hop count or the string `exhaustive`
pub(super) fn depth_limit(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "description": "Number of hops to expand from each seed type, or \"exhaustive\" to follow every reachable type",
        "oneOf": [
            { "type": "integer", "minimum": 0 },
            { "type": "string", "enum": ["exhaustive"] }
        ],
        "default": 1
    })
}

pub(super) fn level(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
    /// Log level
    #[derive(JsonSchema)]
    #[schemars(rename_all = "lowercase")]
    // Only used for its generated schema
    #[allow(dead_code)]
    enum Level {
        Trace,
        Debug,
        Info,
        Warn,
        Error,
    }

    Level::json_schema(generator)
}
