pub mod errors;
mod json_schema;
pub mod runtime;
pub mod schema_tool;
pub mod server;
