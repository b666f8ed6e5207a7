//! Category-scoped subsets of a GraphQL schema.
//!
//! A full API schema is too large to hand to a caller in one piece. This crate groups the
//! schema's types into named categories, each seeded with a handful of curated types, expands
//! every category to the types reachable from its seeds within a configurable depth, and
//! renders the result back to SDL. The expansion runs once at startup and is served from an
//! immutable [`SubschemaCache`] afterwards.
//!
//! ```no_run
//! # async fn example(schema: std::sync::Arc<apollo_compiler::validation::Valid<apollo_compiler::Schema>>) -> Result<(), otp_schema_subset::SubschemaError> {
//! use otp_schema_subset::{CategoryRegistry, DepthLimit, SubschemaStore};
//!
//! let store = SubschemaStore::new();
//! let registry = CategoryRegistry::bundled()?;
//! store.prefetch(Some(schema), &registry, DepthLimit::Limited(1)).await?;
//! let sdl = store.lookup(&["drug-mechanisms"])?;
//! # Ok(())
//! # }
//! ```

mod assemble;
mod cache;
mod category;
mod error;
mod graph;
mod reach;

pub use assemble::{CategorySubschema, assemble, render_sdl};
pub use cache::{SubschemaCache, SubschemaStore};
pub use category::{Category, CategoryRegistry};
pub use error::SubschemaError;
pub use graph::TypeGraph;
pub use reach::{DepthLimit, reach};
