use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("asset not found: {0}")]
    Asset(String),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("assistant unavailable: {0}")]
    Assistant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
