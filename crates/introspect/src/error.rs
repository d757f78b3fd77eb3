use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntrospectError>;

#[derive(Error, Debug)]
pub enum IntrospectError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
