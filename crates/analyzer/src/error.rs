use relgraph_introspect::IntrospectError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("failed to list schema tables: {0}")]
    TableList(#[source] IntrospectError),

    #[error("introspection failed for table `{table}`: {source}")]
    Introspection {
        table: String,
        #[source]
        source: IntrospectError,
    },

    #[error("deadline exceeded during graph computation")]
    DeadlineExceeded,
}
