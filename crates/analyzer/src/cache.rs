//! Memoization of per-table relationship lists and the whole-schema
//! graph.

use crate::types::{Relationship, SchemaGraph};
use std::collections::HashMap;
use std::sync::Arc;

/// Both cache levels plus a schema-generation counter.
///
/// The counter guards against the clear/in-flight race: a computation
/// that started before a [`clear`](Self::clear) observes the old
/// generation and its late insert is silently dropped, so a fresh
/// generation can never be polluted with results from a previous
/// schema.
#[derive(Debug, Default)]
pub(crate) struct RelationshipCache {
    generation: u64,
    by_table: HashMap<String, Vec<Relationship>>,
    graph: Option<Arc<SchemaGraph>>,
}

impl RelationshipCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn get(&self, table: &str) -> Option<Vec<Relationship>> {
        self.by_table.get(table).cloned()
    }

    pub(crate) fn graph(&self) -> Option<Arc<SchemaGraph>> {
        self.graph.clone()
    }

    /// Store a per-table result computed against `generation`; a stale
    /// generation is a no-op.
    pub(crate) fn put_if_current(
        &mut self,
        generation: u64,
        table: &str,
        relationships: Vec<Relationship>,
    ) {
        if generation == self.generation {
            self.by_table.insert(table.to_string(), relationships);
        }
    }

    /// Store a whole-graph result computed against `generation`,
    /// reusing its per-table lists so later single-table lookups hit
    /// the cache instead of recomputing.
    pub(crate) fn set_graph_if_current(&mut self, generation: u64, graph: Arc<SchemaGraph>) {
        if generation != self.generation {
            return;
        }
        for (table, relationships) in &graph.relationships {
            self.by_table.insert(table.clone(), relationships.clone());
        }
        self.graph = Some(graph);
    }

    /// Empty both cache levels and start a new generation.
    pub(crate) fn clear(&mut self) {
        self.generation += 1;
        self.by_table.clear();
        self.graph = None;
    }
}
