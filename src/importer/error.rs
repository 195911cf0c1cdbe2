//! Import pipeline error taxonomy.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to fetch {url}: {message}")]
    Network { url: String, message: String },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Unmapped class code: {0}")]
    UnmappedClass(String),

    #[error("Malformed card list: {0}")]
    MalformedCardList(String),

    #[error("Unknown card dbfId: {0}")]
    UnknownCard(i64),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Import aborted after {imported} of {fetched} decks: {cause}")]
    Aborted {
        imported: usize,
        fetched: usize,
        cause: Box<ImportError>,
    },

    #[error("Catalog worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl From<crate::errors::AppError> for ImportError {
    fn from(err: crate::errors::AppError) -> Self {
        ImportError::Catalog(err.to_string())
    }
}
