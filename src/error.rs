use thiserror::Error;

#[derive(Error, Debug)]
pub enum BankError {
    #[error("Failed to read question bank: {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Local storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Local storage is unavailable")]
    StorageUnavailable,

    #[error("Question bank is empty")]
    Empty,
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize export")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}
