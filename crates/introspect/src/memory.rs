use crate::error::Result;
use crate::introspector::SchemaIntrospector;
use crate::types::ForeignKeyDescriptor;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// In-memory introspector over a fixed table/FK map.
///
/// Deterministic by construction: `tables` comes back in lexicographic
/// order. Used as the fixture backend in tests and by embedders that
/// already hold schema metadata.
#[derive(Debug, Clone, Default)]
pub struct MemoryIntrospector {
    tables: BTreeMap<String, Vec<ForeignKeyDescriptor>>,
}

impl MemoryIntrospector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table together with its outgoing foreign keys.
    #[must_use]
    pub fn with_table(
        mut self,
        name: impl Into<String>,
        foreign_keys: Vec<ForeignKeyDescriptor>,
    ) -> Self {
        self.tables.insert(name.into(), foreign_keys);
        self
    }

    /// Load a schema from JSON of the form
    /// `{"table_name": [<foreign key descriptor>, ...], ...}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let tables: BTreeMap<String, Vec<ForeignKeyDescriptor>> = serde_json::from_str(json)?;
        Ok(Self { tables })
    }
}

#[async_trait]
impl SchemaIntrospector for MemoryIntrospector {
    async fn tables(&self) -> Result<Vec<String>> {
        Ok(self.tables.keys().cloned().collect())
    }

    async fn foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyDescriptor>> {
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn tables_are_sorted() {
        let intro = MemoryIntrospector::new()
            .with_table("orders", vec![])
            .with_table("customers", vec![]);

        let tables = intro.tables().await.unwrap();
        assert_eq!(tables, vec!["customers".to_string(), "orders".to_string()]);
    }

    #[tokio::test]
    async fn unknown_table_has_no_foreign_keys() {
        let intro = MemoryIntrospector::new().with_table("orders", vec![]);

        let fks = intro.foreign_keys("missing").await.unwrap();
        assert!(fks.is_empty());
    }

    #[tokio::test]
    async fn loads_schema_from_json() {
        let json = r#"{
            "orders": [{
                "constrained_columns": ["customer_id"],
                "referred_table": "customers",
                "referred_columns": ["id"],
                "constraint_name": "fk_orders_customer",
                "on_delete": "CASCADE"
            }],
            "customers": []
        }"#;

        let intro = MemoryIntrospector::from_json(json).unwrap();
        let fks = intro.foreign_keys("orders").await.unwrap();
        assert_eq!(fks.len(), 1);
        assert_eq!(fks[0].referred_table, "customers");
        assert_eq!(fks[0].on_delete.as_deref(), Some("CASCADE"));
        assert_eq!(fks[0].on_update, None);
    }
}
