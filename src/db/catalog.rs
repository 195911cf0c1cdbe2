//! Catalog operations the importer issues.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{CatalogDeck, NormalizedDeck};

/// The persisted deck catalog as seen by the importer.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Add a deck carrying `tags`; `auto_archive` stores it archived.
    async fn add_deck(
        &self,
        name: &str,
        deck: &NormalizedDeck,
        auto_archive: bool,
        tags: &[&str],
    ) -> Result<CatalogDeck, AppError>;

    /// Delete every deck carrying `tag`, returning how many were removed.
    async fn delete_all_with_tag(&self, tag: &str) -> Result<u64, AppError>;

    /// Flush the catalog to durable storage.
    async fn persist(&self) -> Result<(), AppError>;
}
