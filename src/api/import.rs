//! Import API endpoints.

use axum::{extract::State, Json};

use super::{error, success, ApiResult};
use crate::models::{ImportOptions, ImportStage, ImportSummary, PurgeSummary};
use crate::AppState;

/// POST /api/import - Run a full import. The run completes even if the client goes away.
pub async fn run_import(
    State(state): State<AppState>,
    Json(options): Json<ImportOptions>,
) -> ApiResult<ImportSummary> {
    let result = state.importer.import_all(options).await;
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match result {
        Ok(summary) => success(summary, revision_id),
        Err(e) => error(e.into(), revision_id),
    }
}

/// DELETE /api/import - Remove every previously imported deck.
pub async fn purge_imported(State(state): State<AppState>) -> ApiResult<PurgeSummary> {
    let result = state.importer.purge().await;
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match result {
        Ok(deleted) => success(PurgeSummary { deleted }, revision_id),
        Err(e) => error(e.into(), revision_id),
    }
}

/// GET /api/import/status - Stage of the current or last import.
pub async fn import_status(State(state): State<AppState>) -> ApiResult<ImportStage> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);
    success(state.importer.stage(), revision_id)
}
