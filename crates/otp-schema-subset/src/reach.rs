//! Depth-bounded breadth-first reachability over a [`TypeGraph`].

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::graph::TypeGraph;

const EXHAUSTIVE: &str = "exhaustive";

/// How far to expand from the seed types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthLimit {
    /// Follow at most this many references from a seed. `0` keeps only the seeds.
    Limited(u32),
    /// Follow references until nothing new is reachable.
    Exhaustive,
}

impl Default for DepthLimit {
    fn default() -> Self {
        DepthLimit::Limited(1)
    }
}

impl fmt::Display for DepthLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthLimit::Limited(depth) => write!(f, "{depth}"),
            DepthLimit::Exhaustive => f.write_str(EXHAUSTIVE),
        }
    }
}

impl Serialize for DepthLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DepthLimit::Limited(depth) => serializer.serialize_u32(*depth),
            DepthLimit::Exhaustive => serializer.serialize_str(EXHAUSTIVE),
        }
    }
}

impl<'de> Deserialize<'de> for DepthLimit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DepthLimitVisitor;
        impl serde::de::Visitor<'_> for DepthLimitVisitor {
            type Value = DepthLimit;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-negative integer or 'exhaustive'")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u32::try_from(v)
                    .map(DepthLimit::Limited)
                    .map_err(|_| E::custom(format!("depth {v} is too large")))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("depth must not be negative, got {v}")))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if v.eq_ignore_ascii_case(EXHAUSTIVE) {
                    return Ok(DepthLimit::Exhaustive);
                }
                // Environment overrides arrive as strings
                v.trim()
                    .parse::<u32>()
                    .map(DepthLimit::Limited)
                    .map_err(|_| E::custom(format!("expected a depth or '{EXHAUSTIVE}', got '{v}'")))
            }
        }

        deserializer.deserialize_any(DepthLimitVisitor)
    }
}

/// Every node reachable from `seeds` within `depth` reference hops, seeds included.
///
/// Seeds that are not nodes of the graph are dropped. Each node is expanded at most once, so
/// cycles terminate, and expansion stops as soon as a hop discovers nothing new.
pub fn reach<'a, I, S>(graph: &TypeGraph, seeds: I, depth: DepthLimit) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    let mut visited = graph.filter_known(seeds);
    let mut frontier: Vec<String> = visited.iter().cloned().collect();
    let mut hops = 0u32;

    while !frontier.is_empty() {
        if matches!(depth, DepthLimit::Limited(max) if hops >= max) {
            break;
        }
        hops += 1;

        let mut next = Vec::new();
        for type_name in &frontier {
            for target in graph.edges(type_name) {
                if !visited.contains(target) {
                    visited.insert(target.to_string());
                    next.push(target.to_string());
                }
            }
        }
        frontier = next;
    }

    visited
}
