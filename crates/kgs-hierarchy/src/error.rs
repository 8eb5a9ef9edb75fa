use thiserror::Error;

#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("invalid hierarchy options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
    #[error("kind table has no entry for {0}")]
    MissingKind(&'static str),
    #[error("duplicate {field} `{value}` in kind table")]
    DuplicateKindValue { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, HierarchyError>;
