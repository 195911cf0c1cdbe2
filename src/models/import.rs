//! Import request, result and progress models.

use serde::{Deserialize, Serialize};

/// Options for a single import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    /// Forwarded to the catalog: new decks are stored archived
    #[serde(default)]
    pub auto_archive: bool,
    /// Purge previously imported decks before fetching
    #[serde(default)]
    pub delete_previous: bool,
    /// Strip the class name from deck titles
    #[serde(default)]
    pub shorten_titles: bool,
}

/// Outcome of a completed import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub fetched: usize,
    pub imported: usize,
    /// Decks removed by the pre-import purge, if one was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purged: Option<u64>,
}

/// Outcome of a purge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeSummary {
    pub deleted: u64,
}

/// Pipeline stage of the current (or last) import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportStage {
    Idle,
    Purging,
    Fetching,
    Resolving,
    Assembling,
    Persisting,
    Done,
    Failed,
}

/// Query parameters for listing catalog decks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckListQuery {
    #[serde(default)]
    pub tag: Option<String>,
}
