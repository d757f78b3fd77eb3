use serde::{Deserialize, Serialize};

/// One foreign-key constraint as declared on a table.
///
/// Column lists are parallel: `constrained_columns[i]` references
/// `referred_columns[i]` on `referred_table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDescriptor {
    pub constrained_columns: Vec<String>,
    pub referred_table: String,
    pub referred_columns: Vec<String>,
    pub constraint_name: String,
    #[serde(default)]
    pub on_delete: Option<String>,
    #[serde(default)]
    pub on_update: Option<String>,
}

impl ForeignKeyDescriptor {
    /// Single-column constraint, the common case in fixtures.
    pub fn simple(
        constraint_name: impl Into<String>,
        column: impl Into<String>,
        referred_table: impl Into<String>,
        referred_column: impl Into<String>,
    ) -> Self {
        Self {
            constrained_columns: vec![column.into()],
            referred_table: referred_table.into(),
            referred_columns: vec![referred_column.into()],
            constraint_name: constraint_name.into(),
            on_delete: None,
            on_update: None,
        }
    }
}
