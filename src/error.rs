use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskforgeError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("History backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    Path(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DeskforgeError {
    pub fn not_found(what: impl Into<String>) -> Self {
        DeskforgeError::NotFound(what.into())
    }

    pub fn invalid(what: impl Into<String>) -> Self {
        DeskforgeError::InvalidValue(what.into())
    }

    /// True for the "unknown id / unknown profile" family of failures
    pub fn is_not_found(&self) -> bool {
        matches!(self, DeskforgeError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DeskforgeError>;
