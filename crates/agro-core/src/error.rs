use thiserror::Error;

/// AGRO 统一错误类型
#[derive(Error, Debug)]
pub enum AgroError {
    #[error("Weather fetch error: {0}")]
    Fetch(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, AgroError>;

impl From<anyhow::Error> for AgroError {
    fn from(err: anyhow::Error) -> Self {
        AgroError::Internal(err.to_string())
    }
}
