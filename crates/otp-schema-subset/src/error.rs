use itertools::Itertools as _;
use tokio::task::JoinError;

/// An error while building or querying category subschemas.
#[derive(Debug, thiserror::Error)]
pub enum SubschemaError {
    /// The type graph was requested before a schema was fetched
    #[error("GraphQL schema is not available; fetch the schema before building the type graph")]
    SchemaUnavailable,

    /// A category registry entry is malformed
    #[error("Invalid category '{category}': {reason}")]
    Configuration { category: String, reason: String },

    #[error("Unable to read category configuration: {0}")]
    ConfigurationFile(#[from] std::io::Error),

    #[error("Invalid category configuration JSON: {0}")]
    ConfigurationJson(#[from] serde_json::Error),

    /// The cache was queried before prefetch completed
    #[error(
        "Category subschemas not initialized. Call prefetch() at server startup before serving lookups."
    )]
    NotInitialized,

    /// One or more requested categories do not exist
    #[error(
        "Invalid category name(s): {}. Available categories: {}",
        .invalid.iter().join(", "),
        .available.iter().join(", ")
    )]
    UnknownCategory {
        invalid: Vec<String>,
        available: Vec<String>,
    },

    /// The build task was cancelled or panicked before publishing
    #[error("Category subschema build did not complete: {0}")]
    BuildAborted(#[from] JoinError),
}
