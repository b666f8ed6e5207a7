use apollo_compiler::{Schema, validation::WithErrors};
use otp_schema_subset::SubschemaError;
use std::fmt;

/// Formats schema diagnostics one per line, without ariadne's source-annotated report
struct SchemaDiagnostics<'a>(&'a WithErrors<Schema>);

impl fmt::Display for SchemaDiagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = &self.0.errors;

        if errors.is_empty() {
            return write!(f, "Unknown error");
        }

        writeln!(f, "GraphQL validation errors:")?;
        for (i, diagnostic) in errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, diagnostic.error)?;
        }

        Ok(())
    }
}

/// An error during server startup
#[derive(Debug)]
pub enum ServerError {
    GraphQLSchema(Box<WithErrors<Schema>>),
    ReadFile {
        path: Option<String>,
        source: std::io::Error,
    },
    NoSchema,
    Subschema(SubschemaError),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::GraphQLSchema(errors) => {
                write!(
                    f,
                    "Could not parse GraphQL schema: {}",
                    SchemaDiagnostics(errors.as_ref())
                )
            }
            ServerError::ReadFile { path, source } => write!(
                f,
                "Could not open file{}: {}",
                path.as_ref().map(|p| format!(" {p}")).unwrap_or_default(),
                source
            ),
            ServerError::NoSchema => write!(f, "No GraphQL schema was provided before startup"),
            ServerError::Subschema(e) => write!(f, "Failed to prepare category subschemas: {}", e),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::ReadFile { source, .. } => Some(source),
            ServerError::Subschema(e) => Some(e),
            ServerError::GraphQLSchema(_) | ServerError::NoSchema => None,
        }
    }
}

impl From<std::io::Error> for ServerError {
    fn from(e: std::io::Error) -> Self {
        ServerError::ReadFile {
            path: None,
            source: e,
        }
    }
}

impl From<SubschemaError> for ServerError {
    fn from(e: SubschemaError) -> Self {
        ServerError::Subschema(e)
    }
}

/// An MCP tool error
pub type McpError = rmcp::model::ErrorData;
