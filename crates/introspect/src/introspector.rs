use crate::error::Result;
use crate::types::ForeignKeyDescriptor;
use async_trait::async_trait;

/// Supplier of raw schema facts.
///
/// Implementations may perform database I/O; the analyzer treats every
/// call as potentially blocking and never caches on this side of the
/// boundary. An unknown table name is not an error — implementations
/// return an empty descriptor list, mirroring "no constraints found".
#[async_trait]
pub trait SchemaIntrospector: Send + Sync {
    /// All table names in the schema.
    async fn tables(&self) -> Result<Vec<String>>;

    /// Foreign keys declared on `table` (outgoing references only).
    async fn foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyDescriptor>>;
}
