//! Catalog API endpoints.

use axum::extract::{Path, Query, State};

use super::{error, success, ApiResult};
use crate::db::RevisionInfo;
use crate::errors::AppError;
use crate::models::{CatalogDeck, DeckListQuery};
use crate::AppState;

/// GET /api/decks - List catalog decks, optionally filtered by tag.
pub async fn list_decks(
    State(state): State<AppState>,
    Query(query): Query<DeckListQuery>,
) -> ApiResult<Vec<CatalogDeck>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_decks(query.tag.as_deref()).await {
        Ok(decks) => success(decks, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/decks/:id - Get a single deck.
pub async fn get_deck(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CatalogDeck> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_deck(&id).await {
        Ok(Some(deck)) => success(deck, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Deck {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/catalog/revision - Current catalog revision.
pub async fn get_revision(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    match state.repo.get_revision_info().await {
        Ok(info) => {
            let revision_id = info.revision_id;
            success(info, revision_id)
        }
        Err(e) => error(e, 0),
    }
}
