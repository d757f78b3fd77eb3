//! Public facade over the builder, cache, statistics, cluster, and
//! path components.

use crate::builder;
use crate::cache::RelationshipCache;
use crate::cluster;
use crate::error::Result;
use crate::path;
use crate::stats;
use crate::types::{Direction, RelatedTables, Relationship, SchemaGraph};
use relgraph_introspect::SchemaIntrospector;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Schema relationship graph analyzer.
///
/// Owns its cache; two analyzer instances never share state. All
/// methods take `&self` and are safe to call from concurrent tasks.
/// With no introspector configured every operation degrades to its
/// empty value and logs a warning rather than failing — configuring
/// one via [`set_introspector`](Self::set_introspector) recovers.
pub struct SchemaAnalyzer {
    introspector: RwLock<Option<Arc<dyn SchemaIntrospector>>>,
    cache: RwLock<RelationshipCache>,
}

impl Default for SchemaAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaAnalyzer {
    /// Analyzer with no backing introspector yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            introspector: RwLock::new(None),
            cache: RwLock::new(RelationshipCache::new()),
        }
    }

    #[must_use]
    pub fn with_introspector(introspector: Arc<dyn SchemaIntrospector>) -> Self {
        Self {
            introspector: RwLock::new(Some(introspector)),
            cache: RwLock::new(RelationshipCache::new()),
        }
    }

    /// Swap the backing introspector.
    ///
    /// Implies a cache clear: everything computed against the old
    /// schema is invalid against the new one.
    pub async fn set_introspector(&self, introspector: Arc<dyn SchemaIntrospector>) {
        *self.introspector.write().await = Some(introspector);
        self.clear_cache().await;
    }

    /// Whether an introspector is currently configured.
    pub async fn is_available(&self) -> bool {
        self.introspector.read().await.is_some()
    }

    /// Empty both the per-table and the whole-graph cache.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    /// Full relationship list of one table, outgoing then incoming.
    ///
    /// Cached after the first lookup. An unknown table name yields an
    /// empty list, not an error; only introspection failures surface
    /// as errors.
    pub async fn get_relationships(&self, table: &str) -> Result<Vec<Relationship>> {
        let Some(introspector) = self.current_introspector().await else {
            log::warn!("no schema introspector configured; returning no relationships");
            return Ok(Vec::new());
        };

        let generation = {
            let cache = self.cache.read().await;
            if let Some(hit) = cache.get(table) {
                return Ok(hit);
            }
            cache.generation()
        };

        let relationships = builder::relationships_for(introspector.as_ref(), table).await?;
        self.cache
            .write()
            .await
            .put_if_current(generation, table, relationships.clone());
        Ok(relationships)
    }

    /// Distinct neighbor tables of one table, sorted, split into the
    /// tables it references and the tables referencing it.
    pub async fn get_related_tables(&self, table: &str) -> RelatedTables {
        let relationships = match self.get_relationships(table).await {
            Ok(relationships) => relationships,
            Err(e) => {
                log::warn!("related-table lookup failed for `{table}`: {e}");
                return RelatedTables::default();
            }
        };

        let mut referenced = BTreeSet::new();
        let mut referenced_by = BTreeSet::new();
        for rel in &relationships {
            match rel.direction {
                Direction::Outgoing => referenced.insert(rel.target_table.clone()),
                Direction::Incoming => referenced_by.insert(rel.source_table.clone()),
            };
        }
        RelatedTables {
            referenced: referenced.into_iter().collect(),
            referenced_by: referenced_by.into_iter().collect(),
        }
    }

    /// The whole-schema graph with statistics and clusters, memoized
    /// until the cache is cleared.
    pub async fn build_graph(&self) -> Result<Arc<SchemaGraph>> {
        self.build_graph_with_deadline(None).await
    }

    /// Like [`build_graph`](Self::build_graph), aborting with
    /// [`AnalyzerError::DeadlineExceeded`](crate::AnalyzerError::DeadlineExceeded)
    /// once `deadline` passes. Large schemas make full builds
    /// expensive; the deadline bounds the caller's wait.
    pub async fn build_graph_with_deadline(
        &self,
        deadline: Option<Instant>,
    ) -> Result<Arc<SchemaGraph>> {
        let Some(introspector) = self.current_introspector().await else {
            log::warn!("no schema introspector configured; returning an empty graph");
            return Ok(Arc::new(SchemaGraph::default()));
        };

        let generation = {
            let cache = self.cache.read().await;
            if let Some(graph) = cache.graph() {
                return Ok(graph);
            }
            cache.generation()
        };

        let relationships = builder::build_all(introspector.as_ref(), deadline).await?;
        let statistics = stats::compute(&relationships);
        let clusters = cluster::detect(&relationships, deadline)?;
        let graph = Arc::new(SchemaGraph {
            tables: relationships.keys().cloned().collect(),
            relationships,
            statistics,
            clusters,
        });
        log::debug!(
            "built schema graph: {} tables, {} relationships, {} clusters",
            graph.table_count(),
            graph.relationship_count(),
            graph.clusters.len()
        );

        self.cache
            .write()
            .await
            .set_graph_if_current(generation, Arc::clone(&graph));
        Ok(graph)
    }

    /// Shortest path between two tables, direction ignored.
    ///
    /// Empty when either endpoint is unknown, no path exists, or the
    /// schema could not be read (logged).
    pub async fn find_path(&self, source: &str, destination: &str) -> Vec<String> {
        match self.find_path_with_deadline(source, destination, None).await {
            Ok(path) => path,
            Err(e) => {
                log::warn!("path search from `{source}` to `{destination}` failed: {e}");
                Vec::new()
            }
        }
    }

    /// Like [`find_path`](Self::find_path) with a deadline covering
    /// both the graph build and the search itself.
    pub async fn find_path_with_deadline(
        &self,
        source: &str,
        destination: &str,
        deadline: Option<Instant>,
    ) -> Result<Vec<String>> {
        let graph = self.build_graph_with_deadline(deadline).await?;
        path::shortest_path(&graph.relationships, source, destination, deadline)
    }

    async fn current_introspector(&self) -> Option<Arc<dyn SchemaIntrospector>> {
        self.introspector.read().await.clone()
    }
}
