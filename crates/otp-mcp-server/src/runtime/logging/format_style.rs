use schemars::JsonSchema;
use serde::Deserialize;

/// Output format for log lines, backed by the formatters in `tracing_subscriber::fmt`
#[derive(Debug, Default, Deserialize, JsonSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormatStyle {
    /// Single-line, human-readable records
    #[default]
    Full,
    /// Shorter single-line records
    Compact,
    /// Newline-delimited JSON records
    Json,
    /// Multi-line records with source locations
    Pretty,
}
