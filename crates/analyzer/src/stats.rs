//! Graph-wide structural metrics.

use crate::types::{CentralTable, Direction, GraphStatistics, Relationship};
use std::collections::BTreeMap;

/// How many tables the central-table ranking keeps.
pub(crate) const CENTRAL_TABLE_LIMIT: usize = 10;

/// Compute metrics from the full per-table relationship map.
///
/// `total_relationships` counts outgoing edges only, since every edge
/// appears a second time as the target's incoming entry. Degree
/// averages divide by the full table count, not just tables with
/// edges. The central-table ranking breaks degree ties by table name
/// ascending so results are reproducible.
pub(crate) fn compute(relationships: &BTreeMap<String, Vec<Relationship>>) -> GraphStatistics {
    let total_tables = relationships.len();

    let mut total_relationships = 0;
    let mut tables_with_relationships = 0;
    let mut total_in = 0;
    let mut total_out = 0;
    let mut central: Vec<CentralTable> = Vec::new();

    for (table, rels) in relationships {
        if !rels.is_empty() {
            tables_with_relationships += 1;
        }
        let out_degree = rels
            .iter()
            .filter(|r| r.direction == Direction::Outgoing)
            .count();
        let in_degree = rels.len() - out_degree;

        total_relationships += out_degree;
        total_out += out_degree;
        total_in += in_degree;

        if out_degree + in_degree > 0 {
            central.push(CentralTable {
                table: table.clone(),
                degree: out_degree + in_degree,
            });
        }
    }

    central.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.table.cmp(&b.table)));
    central.truncate(CENTRAL_TABLE_LIMIT);

    let (density, avg_in_degree, avg_out_degree) = if total_tables == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let n = total_tables as f64;
        (
            total_relationships as f64 / n,
            total_in as f64 / n,
            total_out as f64 / n,
        )
    };

    GraphStatistics {
        total_tables,
        total_relationships,
        tables_with_relationships,
        density,
        central_tables: central,
        avg_in_degree,
        avg_out_degree,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use relgraph_introspect::ForeignKeyDescriptor;

    fn edge(source: &str, target: &str) -> (Relationship, Relationship) {
        let fk = ForeignKeyDescriptor::simple(
            format!("fk_{source}_{target}"),
            format!("{target}_id"),
            target,
            "id",
        );
        (
            Relationship::outgoing(source, &fk),
            Relationship::incoming(source, &fk),
        )
    }

    fn schema(edges: &[(&str, &str)], isolated: &[&str]) -> BTreeMap<String, Vec<Relationship>> {
        let mut map: BTreeMap<String, Vec<Relationship>> = BTreeMap::new();
        for &(source, target) in edges {
            let (out, inc) = edge(source, target);
            map.entry(source.to_string()).or_default().push(out);
            map.entry(target.to_string()).or_default().push(inc);
        }
        for &table in isolated {
            map.entry(table.to_string()).or_default();
        }
        map
    }

    #[test]
    fn empty_schema_has_zero_statistics() {
        let stats = compute(&BTreeMap::new());
        assert_eq!(stats.total_tables, 0);
        assert_eq!(stats.total_relationships, 0);
        assert_eq!(stats.density, 0.0);
        assert_eq!(stats.avg_in_degree, 0.0);
        assert!(stats.central_tables.is_empty());
    }

    #[test]
    fn density_counts_outgoing_edges_only() {
        // 5 tables, 4 foreign keys: density 4/5.
        let map = schema(
            &[("b", "a"), ("c", "a"), ("d", "a"), ("e", "a")],
            &[],
        );
        let stats = compute(&map);
        assert_eq!(stats.total_tables, 5);
        assert_eq!(stats.total_relationships, 4);
        assert_eq!(stats.density, 0.8);
    }

    #[test]
    fn averages_divide_by_all_tables() {
        let map = schema(&[("b", "a")], &["c", "d"]);
        let stats = compute(&map);
        assert_eq!(stats.total_tables, 4);
        assert_eq!(stats.tables_with_relationships, 2);
        assert_eq!(stats.avg_in_degree, 0.25);
        assert_eq!(stats.avg_out_degree, 0.25);
    }

    #[test]
    fn central_tables_break_ties_by_name() {
        // a and b both end up with degree 1.
        let map = schema(&[("b", "a")], &[]);
        let stats = compute(&map);
        let names: Vec<&str> = stats
            .central_tables
            .iter()
            .map(|c| c.table.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn hub_table_ranks_first() {
        let map = schema(&[("b", "a"), ("c", "a"), ("c", "b")], &[]);
        let stats = compute(&map);
        assert_eq!(stats.central_tables[0].table, "a");
        assert_eq!(stats.central_tables[0].degree, 2);
    }

    #[test]
    fn self_loop_counts_once_per_direction() {
        let map = schema(&[("a", "a")], &[]);
        let stats = compute(&map);
        assert_eq!(stats.total_relationships, 1);
        assert_eq!(stats.central_tables[0].degree, 2);
        assert_eq!(stats.avg_in_degree, 1.0);
        assert_eq!(stats.avg_out_degree, 1.0);
    }
}
