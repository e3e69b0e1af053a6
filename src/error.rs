use thiserror::Error;

/// This type represents all possible errors in impulsedb lib.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration: {0}")]
    Configuration(String),
    #[error("Key not found")]
    KeyNotFound,
    #[error("Entry `{0}` is not an object")]
    NotAnObject(String),
    #[error("Adapter: {0}")]
    Adapter(#[from] anyhow::Error),
    #[error("Serde_json")]
    SerdeJson(#[from] serde_json::Error),
}

/// Alias for a Result with the error type impulsedb::Error
pub type Result<T> = std::result::Result<T, crate::Error>;
