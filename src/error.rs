use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaperwingError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PaperwingError>;
