use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to parse studied specimen: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{kind} without an id at position {position}")]
    MissingId { kind: &'static str, position: usize },
    #[error("invalid node key: {0}")]
    InvalidNodeKey(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
