//! Turns introspector facts into per-table relationship lists.

use crate::error::{AnalyzerError, Result};
use crate::types::Relationship;
use relgraph_introspect::{ForeignKeyDescriptor, SchemaIntrospector};
use std::collections::BTreeMap;
use std::time::Instant;

pub(crate) fn deadline_expired(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}

/// Relationships of a single table: its own foreign keys as outgoing
/// edges, plus a scan over every table's foreign keys for references
/// back to it.
///
/// A failure fetching `table`'s own keys surfaces as the error of the
/// whole call; a failure on any *other* table during the incoming scan
/// is logged and that table skipped, so one broken table cannot hide
/// the rest of the schema.
pub(crate) async fn relationships_for(
    introspector: &dyn SchemaIntrospector,
    table: &str,
) -> Result<Vec<Relationship>> {
    let own = introspector
        .foreign_keys(table)
        .await
        .map_err(|source| AnalyzerError::Introspection {
            table: table.to_string(),
            source,
        })?;

    let mut relationships: Vec<Relationship> = own
        .iter()
        .map(|fk| Relationship::outgoing(table, fk))
        .collect();

    let mut tables = introspector.tables().await.map_err(AnalyzerError::TableList)?;
    tables.sort();
    tables.dedup();

    // The scan includes `table` itself so a self-referencing foreign
    // key shows up once per direction.
    for other in &tables {
        let fks = if other == table {
            own.clone()
        } else {
            match introspector.foreign_keys(other).await {
                Ok(fks) => fks,
                Err(e) => {
                    log::warn!("skipping table `{other}` during incoming scan: {e}");
                    continue;
                }
            }
        };
        for fk in &fks {
            if fk.referred_table == table {
                relationships.push(Relationship::incoming(other, fk));
            }
        }
    }

    Ok(relationships)
}

/// Relationship lists for every table in the schema.
///
/// Outgoing foreign keys are fetched once per table; incoming edges
/// come from a reverse index built in the same pass, so the whole
/// build stays linear in the number of foreign keys instead of
/// rescanning the schema per table.
pub(crate) async fn build_all(
    introspector: &dyn SchemaIntrospector,
    deadline: Option<Instant>,
) -> Result<BTreeMap<String, Vec<Relationship>>> {
    let mut tables = introspector.tables().await.map_err(AnalyzerError::TableList)?;
    tables.sort();
    tables.dedup();

    let mut outgoing: BTreeMap<String, Vec<ForeignKeyDescriptor>> = BTreeMap::new();
    for table in &tables {
        if deadline_expired(deadline) {
            return Err(AnalyzerError::DeadlineExceeded);
        }
        match introspector.foreign_keys(table).await {
            Ok(fks) => {
                outgoing.insert(table.clone(), fks);
            }
            Err(e) => {
                log::warn!("introspection failed for table `{table}`, treating as empty: {e}");
                outgoing.insert(table.clone(), Vec::new());
            }
        }
    }

    // Reverse index: referred table -> (declaring table, fk).
    let mut incoming: BTreeMap<&str, Vec<(&str, &ForeignKeyDescriptor)>> = BTreeMap::new();
    for (table, fks) in &outgoing {
        for fk in fks {
            incoming
                .entry(fk.referred_table.as_str())
                .or_default()
                .push((table.as_str(), fk));
        }
    }

    let mut map = BTreeMap::new();
    for table in &tables {
        let mut relationships: Vec<Relationship> = outgoing[table]
            .iter()
            .map(|fk| Relationship::outgoing(table, fk))
            .collect();
        if let Some(sources) = incoming.get(table.as_str()) {
            relationships.extend(
                sources
                    .iter()
                    .map(|(source, fk)| Relationship::incoming(source, fk)),
            );
        }
        map.insert(table.clone(), relationships);
    }

    Ok(map)
}
