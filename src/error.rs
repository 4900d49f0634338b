use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Shadow send not found: {0}")]
    ShadowNotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
