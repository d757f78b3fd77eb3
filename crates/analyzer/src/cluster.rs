//! Connected-component detection over the undirected view of the graph.

use crate::builder::deadline_expired;
use crate::error::{AnalyzerError, Result};
use crate::types::{Cluster, Direction, Relationship};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

/// Undirected adjacency between known tables.
///
/// Edges pointing at tables absent from the map (foreign keys into
/// other schemas) are dropped; both endpoints must be graph vertices.
pub(crate) fn undirected_adjacency(
    relationships: &BTreeMap<String, Vec<Relationship>>,
) -> BTreeMap<&str, BTreeSet<&str>> {
    let mut adjacency: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (table, rels) in relationships {
        for rel in rels {
            let peer = rel.peer();
            if relationships.contains_key(peer) {
                adjacency.entry(table).or_default().insert(peer);
            }
        }
    }
    adjacency
}

/// Partition tables with at least one relationship into connected
/// clusters, direction ignored.
///
/// Flood fill is iterative (stack-based) and visits starting tables in
/// lexicographic order, so membership and ordering are stable across
/// runs. Results come back sorted by size descending, ties broken by
/// the first member name; ids are assigned after sorting. An isolated
/// table is never a cluster, and neither is a table whose foreign
/// keys all dangle outside the schema — but a table whose only edge
/// is a self-reference forms a cluster of one.
pub(crate) fn detect(
    relationships: &BTreeMap<String, Vec<Relationship>>,
    deadline: Option<Instant>,
) -> Result<Vec<Cluster>> {
    let adjacency = undirected_adjacency(relationships);
    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut clusters = Vec::new();

    for (table, rels) in relationships {
        if deadline_expired(deadline) {
            return Err(AnalyzerError::DeadlineExceeded);
        }
        if rels.is_empty() || visited.contains(table.as_str()) {
            continue;
        }

        let mut members: BTreeSet<&str> = BTreeSet::new();
        let mut stack = vec![table.as_str()];
        while let Some(current) = stack.pop() {
            if !members.insert(current) {
                continue;
            }
            visited.insert(current);
            if let Some(neighbors) = adjacency.get(current) {
                for &neighbor in neighbors {
                    if !members.contains(neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
        }

        // A lone table only counts as a cluster when it is connected
        // to itself; relationships whose peers are not graph vertices
        // (dangling foreign keys) do not qualify.
        if members.len() == 1 {
            let member = table.as_str();
            let self_connected = adjacency
                .get(member)
                .is_some_and(|neighbors| neighbors.contains(member));
            if !self_connected {
                continue;
            }
        }

        let internal_relationship_count = members
            .iter()
            .flat_map(|member| &relationships[*member])
            .filter(|rel| {
                rel.direction == Direction::Outgoing && members.contains(rel.target_table.as_str())
            })
            .count();

        clusters.push(Cluster {
            id: 0,
            tables: members.iter().map(ToString::to_string).collect(),
            size: members.len(),
            internal_relationship_count,
        });
    }

    clusters.sort_by(|a, b| {
        b.size
            .cmp(&a.size)
            .then_with(|| a.tables.first().cmp(&b.tables.first()))
    });
    for (index, cluster) in clusters.iter_mut().enumerate() {
        cluster.id = index + 1;
    }

    Ok(clusters)
}
