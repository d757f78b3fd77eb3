//! Shortest-path search between two tables.

use crate::builder::deadline_expired;
use crate::cluster::undirected_adjacency;
use crate::error::{AnalyzerError, Result};
use crate::types::Relationship;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::time::Instant;

/// Breadth-first search over the undirected view of the graph.
///
/// Returns the table names from `source` to `destination` inclusive,
/// minimum edge count guaranteed by BFS. Unknown endpoints and
/// unreachable pairs yield an empty path, never an error. Neighbors
/// are expanded in lexicographic order so that when several shortest
/// paths exist, the same one comes back every run.
pub(crate) fn shortest_path(
    relationships: &BTreeMap<String, Vec<Relationship>>,
    source: &str,
    destination: &str,
    deadline: Option<Instant>,
) -> Result<Vec<String>> {
    if !relationships.contains_key(source) || !relationships.contains_key(destination) {
        return Ok(Vec::new());
    }
    if source == destination {
        return Ok(vec![source.to_string()]);
    }

    let adjacency = undirected_adjacency(relationships);
    let mut visited: HashSet<&str> = HashSet::from([source]);
    let mut parent: HashMap<&str, &str> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::from([source]);

    while let Some(current) = queue.pop_front() {
        if deadline_expired(deadline) {
            return Err(AnalyzerError::DeadlineExceeded);
        }
        let Some(neighbors) = adjacency.get(current) else {
            continue;
        };
        for &neighbor in neighbors {
            if !visited.insert(neighbor) {
                continue;
            }
            parent.insert(neighbor, current);
            if neighbor == destination {
                return Ok(reconstruct(&parent, source, destination));
            }
            queue.push_back(neighbor);
        }
    }

    Ok(Vec::new())
}

fn reconstruct(parent: &HashMap<&str, &str>, source: &str, destination: &str) -> Vec<String> {
    let mut path = vec![destination.to_string()];
    let mut current = destination;
    while current != source {
        current = parent[current];
        path.push(current.to_string());
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use relgraph_introspect::ForeignKeyDescriptor;

    fn schema(edges: &[(&str, &str)], isolated: &[&str]) -> BTreeMap<String, Vec<Relationship>> {
        let mut map: BTreeMap<String, Vec<Relationship>> = BTreeMap::new();
        for &(source, target) in edges {
            let fk = ForeignKeyDescriptor::simple(
                format!("fk_{source}_{target}"),
                format!("{target}_id"),
                target,
                "id",
            );
            map.entry(source.to_string())
                .or_default()
                .push(Relationship::outgoing(source, &fk));
            map.entry(target.to_string())
                .or_default()
                .push(Relationship::incoming(source, &fk));
        }
        for &table in isolated {
            map.entry(table.to_string()).or_default();
        }
        map
    }

    #[test]
    fn path_ignores_edge_direction() {
        // b -> a and b -> c: a reaches c only through b, against one
        // edge's direction.
        let map = schema(&[("b", "a"), ("b", "c")], &[]);
        let path = shortest_path(&map, "a", "c", None).unwrap();
        assert_eq!(path, vec!["a", "b", "c"]);
    }

    #[test]
    fn same_table_is_a_single_step_path() {
        let map = schema(&[("b", "a")], &["alone"]);
        assert_eq!(shortest_path(&map, "a", "a", None).unwrap(), vec!["a"]);
        // Known even without relationships.
        assert_eq!(
            shortest_path(&map, "alone", "alone", None).unwrap(),
            vec!["alone"]
        );
    }

    #[test]
    fn unknown_endpoint_gives_empty_path() {
        let map = schema(&[("b", "a")], &[]);
        assert!(shortest_path(&map, "a", "ghost", None).unwrap().is_empty());
        assert!(shortest_path(&map, "ghost", "a", None).unwrap().is_empty());
    }

    #[test]
    fn unreachable_tables_give_empty_path() {
        let map = schema(&[("b", "a")], &["island"]);
        assert!(shortest_path(&map, "a", "island", None).unwrap().is_empty());
    }

    #[test]
    fn bfs_prefers_fewest_edges() {
        // Two routes a..e: a-b-e (2 edges) and a-c-d-e (3 edges).
        let map = schema(&[("b", "a"), ("e", "b"), ("c", "a"), ("d", "c"), ("e", "d")], &[]);
        let path = shortest_path(&map, "a", "e", None).unwrap();
        assert_eq!(path, vec!["a", "b", "e"]);
    }

    #[test]
    fn cyclic_graph_terminates() {
        let map = schema(&[("a", "b"), ("b", "c"), ("c", "a")], &[]);
        let path = shortest_path(&map, "a", "c", None).unwrap();
        assert_eq!(path, vec!["a", "c"]);
    }

    #[test]
    fn expired_deadline_stops_search() {
        let map = schema(&[("b", "a")], &[]);
        let deadline = Some(Instant::now() - std::time::Duration::from_millis(1));
        assert!(matches!(
            shortest_path(&map, "a", "b", deadline),
            Err(AnalyzerError::DeadlineExceeded)
        ));
    }
}
