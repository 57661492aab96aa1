use thiserror::Error;

#[derive(Error, Debug)]
pub enum RxviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid view definition: {0}")]
    Config(String),

    #[error("Record source error: {0}")]
    Source(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, RxviewError>;
