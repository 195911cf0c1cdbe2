//! Normalized and persisted deck models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::importer::HeroClass;

/// Tag carried by every deck created from an archetype snapshot.
pub const ARCHETYPE_TAG: &str = "Archetype";

/// Tag identifying decks owned by this importer; purges select on it.
pub const ADVISOR_TAG: &str = "Advisor";

/// A card slot in a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckCard {
    pub dbf_id: i64,
    pub card_id: String,
    pub name: String,
    pub count: u32,
}

/// A deck assembled from one snapshot entry, ready to be added to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDeck {
    pub name: String,
    pub class: HeroClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archetype_id: Option<String>,
    pub cards: Vec<DeckCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_deck_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_games: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl NormalizedDeck {
    /// Total number of cards, counting duplicates.
    pub fn card_count(&self) -> u32 {
        self.cards.iter().map(|c| c.count).sum()
    }
}

/// A deck as stored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDeck {
    pub id: String,
    pub name: String,
    /// Local class name, e.g. `DemonHunter`
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archetype_id: Option<String>,
    pub cards: Vec<DeckCard>,
    pub tags: Vec<String>,
    pub archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_games: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_deck_id: Option<String>,
    pub created_at: String,
}

impl CatalogDeck {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
