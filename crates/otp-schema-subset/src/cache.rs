//! The category subschemas computed once at startup.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use apollo_compiler::Schema;
use apollo_compiler::validation::Valid;
use tokio::sync::OnceCell;
use tracing::info;

use crate::assemble::{CategorySubschema, assemble, render_sdl};
use crate::category::CategoryRegistry;
use crate::error::SubschemaError;
use crate::graph::TypeGraph;
use crate::reach::DepthLimit;

/// An immutable snapshot of every category's subschema.
///
/// Produced whole by [`SubschemaCache::build`]; there is no way to add to or change it afterwards.
#[derive(Debug)]
pub struct SubschemaCache {
    schema: Arc<Valid<Schema>>,
    subschemas: BTreeMap<String, CategorySubschema>,
    depth: DepthLimit,
}

impl SubschemaCache {
    /// Assemble the subschema of every category in `registry`.
    pub fn build(
        schema: Option<Arc<Valid<Schema>>>,
        registry: &CategoryRegistry,
        depth: DepthLimit,
    ) -> Result<Self, SubschemaError> {
        let start_time = Instant::now();
        let graph = TypeGraph::build(schema.as_deref())?;
        let schema = schema.ok_or(SubschemaError::SchemaUnavailable)?;

        let subschemas = registry
            .iter()
            .map(|category| {
                (
                    category.name.clone(),
                    assemble(category, &graph, &schema, depth),
                )
            })
            .collect::<BTreeMap<_, _>>();

        info!(
            categories = subschemas.len(),
            types = graph.len(),
            %depth,
            elapsed = ?start_time.elapsed(),
            "Built category subschemas"
        );

        Ok(Self {
            schema,
            subschemas,
            depth,
        })
    }

    /// The subschema of a single category.
    pub fn get(&self, category: &str) -> Result<&CategorySubschema, SubschemaError> {
        self.subschemas
            .get(category)
            .ok_or_else(|| self.unknown(vec![category.to_string()]))
    }

    /// Every valid category name, sorted.
    pub fn list_category_names(&self) -> Vec<String> {
        self.subschemas.keys().cloned().collect()
    }

    /// Combined, deduplicated SDL for the union of the requested categories.
    ///
    /// All names are checked before anything is rendered; if any are unknown, the error lists
    /// them together with every valid name.
    pub fn lookup<S: AsRef<str>>(&self, categories: &[S]) -> Result<String, SubschemaError> {
        let invalid: Vec<String> = categories
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !self.subschemas.contains_key(*name))
            .map(str::to_string)
            .collect();
        if !invalid.is_empty() {
            return Err(self.unknown(invalid));
        }

        let types: BTreeSet<&str> = categories
            .iter()
            .filter_map(|name| self.subschemas.get(name.as_ref()))
            .flat_map(|subschema| subschema.expanded_types.iter().map(String::as_str))
            .collect();

        Ok(render_sdl(&self.schema, types))
    }

    /// The depth every subschema was expanded with
    pub fn depth(&self) -> DepthLimit {
        self.depth
    }

    pub fn schema(&self) -> &Valid<Schema> {
        &self.schema
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategorySubschema> {
        self.subschemas.values()
    }

    pub fn len(&self) -> usize {
        self.subschemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subschemas.is_empty()
    }

    fn unknown(&self, invalid: Vec<String>) -> SubschemaError {
        SubschemaError::UnknownCategory {
            invalid,
            available: self.list_category_names(),
        }
    }
}

/// Holds the [`SubschemaCache`] once it has been built.
///
/// The store starts empty. The first [`prefetch`](Self::prefetch) builds the cache on the
/// blocking pool while any concurrent callers wait on the same build; the finished cache is
/// published in one step and every caller receives it. If the build fails or the prefetching
/// future is dropped, nothing is published and a later prefetch starts over. Reads never lock.
#[derive(Debug, Default)]
pub struct SubschemaStore {
    cache: OnceCell<Arc<SubschemaCache>>,
}

impl SubschemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and publish the cache, or return the one already published.
    ///
    /// Arguments of calls after the first successful one are ignored.
    pub async fn prefetch(
        &self,
        schema: Option<Arc<Valid<Schema>>>,
        registry: &CategoryRegistry,
        depth: DepthLimit,
    ) -> Result<Arc<SubschemaCache>, SubschemaError> {
        self.cache
            .get_or_try_init(|| async {
                let registry = registry.clone();
                let cache = tokio::task::spawn_blocking(move || {
                    SubschemaCache::build(schema, &registry, depth)
                })
                .await??;
                Ok::<_, SubschemaError>(Arc::new(cache))
            })
            .await
            .cloned()
    }

    /// Whether prefetch has completed
    pub fn is_ready(&self) -> bool {
        self.cache.initialized()
    }

    /// The published snapshot.
    pub fn snapshot(&self) -> Result<&Arc<SubschemaCache>, SubschemaError> {
        self.cache.get().ok_or(SubschemaError::NotInitialized)
    }

    pub fn get(&self, category: &str) -> Result<&CategorySubschema, SubschemaError> {
        self.snapshot()?.get(category)
    }

    pub fn list_category_names(&self) -> Result<Vec<String>, SubschemaError> {
        Ok(self.snapshot()?.list_category_names())
    }

    pub fn lookup<S: AsRef<str>>(&self, categories: &[S]) -> Result<String, SubschemaError> {
        self.snapshot()?.lookup(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tracing_test::traced_test;

    const TEST_SCHEMA: &str = include_str!("testdata/schema.graphql");

    const CATEGORIES: &str = r#"{
        "target-info": {
            "description": "Target information and pathways",
            "types": ["Target", "Pathway"]
        },
        "disease-info": {
            "description": "Disease information and drugs",
            "types": ["Disease", "Drug"]
        },
        "shared-types": {
            "description": "Common shared types",
            "types": ["Pagination"]
        },
        "misconfigured": {
            "description": "Nothing here exists",
            "types": ["NonExistentType"]
        }
    }"#;

    #[fixture]
    fn schema() -> Arc<Valid<Schema>> {
        Arc::new(
            Schema::parse_and_validate(TEST_SCHEMA, "schema.graphql")
                .expect("Failed to parse test schema"),
        )
    }

    #[fixture]
    fn registry() -> CategoryRegistry {
        CategoryRegistry::from_json(CATEGORIES).expect("Failed to parse test categories")
    }

    #[fixture]
    fn cache(schema: Arc<Valid<Schema>>, registry: CategoryRegistry) -> SubschemaCache {
        SubschemaCache::build(Some(schema), &registry, DepthLimit::Limited(1))
            .expect("Failed to build cache")
    }

    #[rstest]
    fn build_requires_a_schema(registry: CategoryRegistry) {
        let result = SubschemaCache::build(None, &registry, DepthLimit::Limited(1));
        assert!(matches!(result, Err(SubschemaError::SchemaUnavailable)));
    }

    #[rstest]
    fn builds_every_category(cache: SubschemaCache) {
        insta::assert_debug_snapshot!(cache.list_category_names(), @r#"
        [
            "disease-info",
            "misconfigured",
            "shared-types",
            "target-info",
        ]
        "#);
        assert_eq!(cache.depth(), DepthLimit::Limited(1));
        assert!(cache.get("misconfigured").unwrap().expanded_types.is_empty());
    }

    #[rstest]
    fn get_unknown_category_fails(cache: SubschemaCache) {
        let error = cache.get("unknown-category").unwrap_err();
        assert!(error.to_string().contains("unknown-category"));
    }

    #[rstest]
    fn lookup_merges_and_deduplicates(cache: SubschemaCache) {
        let target = cache.get("target-info").unwrap();
        let disease = cache.get("disease-info").unwrap();
        let expected: BTreeSet<&str> = target
            .expanded_types
            .iter()
            .chain(disease.expanded_types.iter())
            .map(String::as_str)
            .collect();

        let sdl = cache.lookup(&["target-info", "disease-info"]).unwrap();

        assert_eq!(sdl, render_sdl(cache.schema(), expected));
        assert_eq!(sdl.matches("type Disease {").count(), 1);
        assert_eq!(sdl.matches("type Target").count(), 1);
    }

    #[rstest]
    fn lookup_ignores_request_order_and_repeats(cache: SubschemaCache) {
        let forward = cache.lookup(&["shared-types", "target-info"]).unwrap();
        let backward = cache
            .lookup(&["target-info", "shared-types", "target-info"])
            .unwrap();
        assert_eq!(forward, backward);
    }

    #[rstest]
    fn lookup_of_a_single_category_matches_its_sdl(cache: SubschemaCache) {
        let sdl = cache.lookup(&["target-info"]).unwrap();
        assert_eq!(sdl, cache.get("target-info").unwrap().sdl);
    }

    #[rstest]
    fn lookup_rejects_unknown_categories(cache: SubschemaCache) {
        let error = cache
            .lookup(&["target-info", "unknown-category"])
            .unwrap_err();

        insta::assert_snapshot!(
            error.to_string(),
            @"Invalid category name(s): unknown-category. Available categories: disease-info, misconfigured, shared-types, target-info"
        );
    }

    #[rstest]
    fn lookup_of_empty_categories_is_empty(cache: SubschemaCache) {
        assert_eq!(cache.lookup(&["misconfigured"]).unwrap(), "");
        assert_eq!(cache.lookup::<&str>(&[]).unwrap(), "");
    }

    #[test]
    fn store_is_not_initialized_before_prefetch() {
        let store = SubschemaStore::new();

        assert!(!store.is_ready());
        assert!(matches!(store.get("target-info"), Err(SubschemaError::NotInitialized)));
        assert!(matches!(
            store.list_category_names(),
            Err(SubschemaError::NotInitialized)
        ));
        let error = store.lookup(&["target-info"]).unwrap_err();
        assert!(error.to_string().contains("not initialized"));
    }

    #[rstest]
    #[tokio::test]
    async fn prefetch_publishes_the_cache(
        schema: Arc<Valid<Schema>>,
        registry: CategoryRegistry,
    ) {
        let store = SubschemaStore::new();
        store
            .prefetch(Some(schema), &registry, DepthLimit::Limited(0))
            .await
            .unwrap();

        assert!(store.is_ready());
        assert_eq!(store.snapshot().unwrap().depth(), DepthLimit::Limited(0));
        assert_eq!(
            store.get("target-info").unwrap().expanded_types,
            BTreeSet::from(["Pathway".to_string(), "Target".to_string()])
        );
        assert_eq!(store.list_category_names().unwrap().len(), 4);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_prefetch_builds_once(
        schema: Arc<Valid<Schema>>,
        registry: CategoryRegistry,
    ) {
        let store = Arc::new(SubschemaStore::new());

        let handles: Vec<_> = (0..8u32)
            .map(|depth| {
                let store = store.clone();
                let schema = schema.clone();
                let registry = registry.clone();
                tokio::spawn(async move {
                    store
                        .prefetch(Some(schema), &registry, DepthLimit::Limited(depth))
                        .await
                })
            })
            .collect();

        let mut published = Vec::new();
        for handle in handles {
            published.push(handle.await.unwrap().unwrap());
        }

        let first = store.snapshot().unwrap();
        assert!(published.iter().all(|cache| Arc::ptr_eq(cache, first)));
    }

    #[rstest]
    #[tokio::test]
    async fn failed_prefetch_publishes_nothing(registry: CategoryRegistry, schema: Arc<Valid<Schema>>) {
        let store = SubschemaStore::new();

        let result = store.prefetch(None, &registry, DepthLimit::Limited(1)).await;
        assert!(matches!(result, Err(SubschemaError::SchemaUnavailable)));
        assert!(!store.is_ready());

        store
            .prefetch(Some(schema), &registry, DepthLimit::Limited(1))
            .await
            .unwrap();
        assert!(store.is_ready());
    }

    fn chain_schema(length: usize) -> Arc<Valid<Schema>> {
        let mut sdl = String::from("type Query { start: Link0 }\n");
        for i in 0..length {
            sdl.push_str(&format!("type Link{i} {{ id: ID next: Link{} }}\n", i + 1));
        }
        sdl.push_str(&format!("type Link{length} {{ id: ID }}\n"));
        Arc::new(Schema::parse_and_validate(sdl, "chain.graphql").unwrap())
    }

    #[tokio::test]
    async fn cancelled_prefetch_publishes_nothing() {
        let schema = chain_schema(3000);
        let registry = CategoryRegistry::from_json(
            r#"{ "chain": { "description": "A long chain", "types": ["Link0"] } }"#,
        )
        .unwrap();
        let store = Arc::new(SubschemaStore::new());

        let pending = tokio::spawn({
            let store = store.clone();
            let schema = schema.clone();
            let registry = registry.clone();
            async move {
                store
                    .prefetch(Some(schema), &registry, DepthLimit::Exhaustive)
                    .await
            }
        });
        // Let the task start its build, then drop it before it can publish
        tokio::task::yield_now().await;
        pending.abort();
        assert!(pending.await.unwrap_err().is_cancelled());

        assert!(!store.is_ready());
        assert!(matches!(store.snapshot(), Err(SubschemaError::NotInitialized)));

        let cache = store
            .prefetch(Some(schema), &registry, DepthLimit::Limited(2))
            .await
            .unwrap();
        assert!(store.is_ready());
        assert_eq!(cache.depth(), DepthLimit::Limited(2));
        assert_eq!(
            cache.get("chain").unwrap().expanded_types,
            BTreeSet::from(["Link0".to_string(), "Link1".to_string(), "Link2".to_string()])
        );
    }

    #[rstest]
    fn bundled_registry_tolerates_missing_seed_types(schema: Arc<Valid<Schema>>) {
        let registry = CategoryRegistry::bundled().unwrap();

        let cache = SubschemaCache::build(Some(schema), &registry, DepthLimit::Limited(1)).unwrap();

        assert_eq!(cache.len(), registry.len());
        let drugs = cache.get("drug-mechanisms").unwrap();
        assert!(drugs.expanded_types.contains("Drug"));
        assert!(!drugs.expanded_types.contains("MechanismsOfAction"));
        let safety = cache.get("target-safety").unwrap();
        assert!(safety.expanded_types.is_empty());
        assert_eq!(safety.sdl, "");
    }

    #[test]
    #[traced_test]
    fn build_logs_a_summary() {
        let schema = Arc::new(Schema::parse_and_validate(TEST_SCHEMA, "schema.graphql").unwrap());
        let registry = CategoryRegistry::from_json(CATEGORIES).unwrap();

        SubschemaCache::build(Some(schema), &registry, DepthLimit::Exhaustive).unwrap();

        assert!(logs_contain("Built category subschemas"));
        assert!(logs_contain("depth=exhaustive"));
    }
}
