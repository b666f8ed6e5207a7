//! Expand a category into a connected set of types and render it as SDL.

use std::collections::BTreeSet;

use apollo_compiler::Schema;
use tracing::debug;

use crate::category::Category;
use crate::graph::TypeGraph;
use crate::reach::{DepthLimit, reach};

/// The expanded subschema of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySubschema {
    pub name: String,
    pub description: String,
    /// Seeds present in the schema plus everything reachable from them
    pub expanded_types: BTreeSet<String>,
    /// The depth the expansion was computed with
    pub depth: DepthLimit,
    /// Type definitions of `expanded_types`, in lexical order
    pub sdl: String,
}

/// Expand `category` over `graph` and render the resulting types from `schema`.
///
/// A category whose seeds are all unknown resolves to an empty subschema.
pub fn assemble(
    category: &Category,
    graph: &TypeGraph,
    schema: &Schema,
    depth: DepthLimit,
) -> CategorySubschema {
    let seeds = graph.filter_known(&category.seed_types);
    if seeds.len() < category.seed_types.len() {
        debug!(
            category = %category.name,
            skipped = ?category.seed_types.difference(&seeds).collect::<Vec<_>>(),
            "Skipping seed types missing from the schema"
        );
    }

    let expanded_types = if seeds.is_empty() {
        BTreeSet::new()
    } else {
        reach(graph, &seeds, depth)
    };
    let sdl = render_sdl(schema, &expanded_types);

    debug!(
        category = %category.name,
        seeds = seeds.len(),
        types = expanded_types.len(),
        %depth,
        "Assembled category subschema"
    );

    CategorySubschema {
        name: category.name.clone(),
        description: category.description.clone(),
        expanded_types,
        depth,
        sdl,
    }
}

/// Render the definitions of `types` separated by blank lines, in lexical order.
///
/// Names that are not defined in `schema` are skipped.
pub fn render_sdl<'a, I, S>(schema: &Schema, types: I) -> String
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    let sorted: BTreeSet<&str> = types.into_iter().map(|name| name.as_ref()).collect();
    sorted
        .into_iter()
        .filter_map(|name| schema.types.get(name))
        .map(|extended_type| extended_type.serialize().to_string())
        .map(|definition| definition.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}
