use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("secret store error: {0}")]
    Store(String),

    #[error("manifest error: {0}")]
    Manifest(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The store reported that the secret does not exist.
    ///
    /// This is the expected outcome on the create path of an upsert, not a
    /// failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
