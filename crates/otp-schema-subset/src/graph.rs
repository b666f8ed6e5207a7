//! Directed graph of named-type references in a GraphQL schema.

use std::collections::{BTreeSet, HashMap};

use apollo_compiler::Schema;
use apollo_compiler::ast::NamedType;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::validation::Valid;
use tracing::debug;

use crate::error::SubschemaError;

/// Which named types each schema type refers to, with list and non-null wrappers stripped.
///
/// Nodes are the non-built-in named types of the schema. An edge `A -> B` exists when `A`
/// has a field returning `B`, a field argument of type `B`, an input field of type `B`, or
/// (for unions) `B` as a member. Built once and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeGraph {
    edges: HashMap<String, BTreeSet<String>>,
}

impl TypeGraph {
    /// Build the graph from a schema handle.
    ///
    /// Fails with [`SubschemaError::SchemaUnavailable`] when no schema has been fetched yet.
    pub fn build(schema: Option<&Valid<Schema>>) -> Result<Self, SubschemaError> {
        let schema = schema.ok_or(SubschemaError::SchemaUnavailable)?;

        let nodes: BTreeSet<&str> = schema
            .types
            .iter()
            .filter(|(_, extended_type)| !extended_type.is_built_in())
            .map(|(name, _)| name.as_str())
            .collect();

        let edges: HashMap<String, BTreeSet<String>> = schema
            .types
            .iter()
            .filter(|(name, _)| nodes.contains(name.as_str()))
            .map(|(name, extended_type)| {
                let targets = references(extended_type)
                    .filter(|target| nodes.contains(target.as_str()))
                    .map(|target| target.to_string())
                    .collect();
                (name.to_string(), targets)
            })
            .collect();

        let graph = Self { edges };
        debug!(
            types = graph.len(),
            references = graph.edge_count(),
            "Built schema type graph"
        );
        Ok(graph)
    }

    /// Build a graph from explicit adjacency lists.
    ///
    /// Every key becomes a node. Targets that are never listed as a key are dropped so that
    /// traversal can only ever produce known nodes.
    pub fn from_edges<I, N, T>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let raw: Vec<(String, Vec<String>)> = adjacency
            .into_iter()
            .map(|(name, targets)| {
                (
                    name.into(),
                    targets.into_iter().map(Into::into).collect::<Vec<_>>(),
                )
            })
            .collect();
        let nodes: BTreeSet<String> = raw.iter().map(|(name, _)| name.clone()).collect();

        let mut edges: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (name, targets) in raw {
            edges.entry(name).or_default().extend(
                targets
                    .into_iter()
                    .filter(|target| nodes.contains(target.as_str())),
            );
        }
        Self { edges }
    }

    /// Whether the named type is a node of this graph
    pub fn contains(&self, type_name: &str) -> bool {
        self.edges.contains_key(type_name)
    }

    /// The types directly referenced by `type_name`; empty for leaves and unknown names.
    pub fn edges(&self, type_name: &str) -> impl Iterator<Item = &str> {
        self.edges
            .get(type_name)
            .into_iter()
            .flat_map(|targets| targets.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    /// Keep only the names that are nodes of this graph.
    pub fn filter_known<'a, I, S>(&self, names: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a S>,
        S: AsRef<str> + ?Sized + 'a,
    {
        names
            .into_iter()
            .map(|name| name.as_ref())
            .filter(|name| self.contains(name))
            .map(str::to_string)
            .collect()
    }
}

/// The named types a schema type refers to.
fn references(extended_type: &ExtendedType) -> Box<dyn Iterator<Item = &NamedType> + '_> {
    match extended_type {
        ExtendedType::Object(object) => Box::new(object.fields.values().flat_map(|field| {
            std::iter::once(field.ty.inner_named_type())
                .chain(field.arguments.iter().map(|arg| arg.ty.inner_named_type()))
        })),
        ExtendedType::Interface(interface) => {
            Box::new(interface.fields.values().flat_map(|field| {
                std::iter::once(field.ty.inner_named_type())
                    .chain(field.arguments.iter().map(|arg| arg.ty.inner_named_type()))
            }))
        }
        ExtendedType::InputObject(input) => Box::new(
            input
                .fields
                .values()
                .map(|field| field.ty.inner_named_type()),
        ),
        ExtendedType::Union(union) => Box::new(union.members.iter().map(|member| &member.name)),
        ExtendedType::Enum(_) | ExtendedType::Scalar(_) => Box::new(std::iter::empty()),
    }
}
