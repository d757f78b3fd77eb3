use relgraph_introspect::ForeignKeyDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which side of a foreign key a table sees the edge from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// The table declares the foreign key.
    Outgoing,
    /// Another table's foreign key targets this table.
    Incoming,
}

/// One foreign-key edge as seen from a specific table's perspective.
///
/// `source_table` always names the table declaring the constraint and
/// `target_table` the referred table, regardless of direction; only
/// `direction` flips when the same edge is listed for both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub direction: Direction,
    pub source_table: String,
    pub source_columns: Vec<String>,
    pub target_table: String,
    pub target_columns: Vec<String>,
    pub constraint_name: String,
    pub on_delete: Option<String>,
    pub on_update: Option<String>,
}

impl Relationship {
    /// Edge as seen from the declaring table.
    pub(crate) fn outgoing(owner: &str, fk: &ForeignKeyDescriptor) -> Self {
        Self::from_descriptor(Direction::Outgoing, owner, fk)
    }

    /// Edge as seen from the referred table; `source` is the declaring table.
    pub(crate) fn incoming(source: &str, fk: &ForeignKeyDescriptor) -> Self {
        Self::from_descriptor(Direction::Incoming, source, fk)
    }

    fn from_descriptor(direction: Direction, source: &str, fk: &ForeignKeyDescriptor) -> Self {
        Self {
            direction,
            source_table: source.to_string(),
            source_columns: fk.constrained_columns.clone(),
            target_table: fk.referred_table.clone(),
            target_columns: fk.referred_columns.clone(),
            constraint_name: fk.constraint_name.clone(),
            on_delete: fk.on_delete.clone(),
            on_update: fk.on_update.clone(),
        }
    }

    /// The table on the far end of the edge, from the perspective of
    /// the table whose relationship list this entry appears in.
    #[must_use]
    pub fn peer(&self) -> &str {
        match self.direction {
            Direction::Outgoing => &self.target_table,
            Direction::Incoming => &self.source_table,
        }
    }
}

/// Distinct neighbor tables of one table, split by edge direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedTables {
    /// Tables this table's foreign keys point at.
    pub referenced: Vec<String>,
    /// Tables whose foreign keys point at this table.
    pub referenced_by: Vec<String>,
}

/// A table ranked by total relationship count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentralTable {
    pub table: String,
    pub degree: usize,
}

/// Graph-wide structural metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub total_tables: usize,
    /// Outgoing edges only; counting both directions would double-count.
    pub total_relationships: usize,
    pub tables_with_relationships: usize,
    pub density: f64,
    pub central_tables: Vec<CentralTable>,
    pub avg_in_degree: f64,
    pub avg_out_degree: f64,
}

/// A maximal group of tables connected by foreign keys, direction
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// 1-based rank after sorting by size descending.
    pub id: usize,
    pub tables: Vec<String>,
    pub size: usize,
    /// Outgoing edges with both endpoints inside the cluster.
    pub internal_relationship_count: usize,
}

/// The whole-schema relationship graph, built once and memoized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaGraph {
    pub tables: Vec<String>,
    pub relationships: BTreeMap<String, Vec<Relationship>>,
    pub statistics: GraphStatistics,
    pub clusters: Vec<Cluster>,
}

impl SchemaGraph {
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn relationship_count(&self) -> usize {
        self.statistics.total_relationships
    }

    /// Relationship list for one table; empty for unknown names.
    #[must_use]
    pub fn relationships_for(&self, table: &str) -> &[Relationship] {
        self.relationships.get(table).map_or(&[], Vec::as_slice)
    }
}
