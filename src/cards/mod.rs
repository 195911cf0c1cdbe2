//! Card database keyed by numeric database id (dbfId).
//!
//! Loaded once from a HearthstoneJSON-style `cards.json` array.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::importer::ImportError;
use crate::models::CardDefinition;

#[derive(Error, Debug)]
pub enum CardIndexError {
    #[error("Failed to read card database {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse card database: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Card lookup used by the card list decoder.
pub trait CardLookup: Send + Sync {
    /// Fails with `ImportError::UnknownCard` when the id has no entry.
    fn card_by_dbf_id(&self, dbf_id: i64) -> Result<CardDefinition, ImportError>;
}

/// In-memory card database.
#[derive(Debug, Clone, Default)]
pub struct CardIndex {
    cards: HashMap<i64, CardDefinition>,
}

impl CardIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        let mut index = Self::new();
        for card in cards {
            index.add_card(card);
        }
        index
    }

    /// Load a JSON array of card definitions from disk.
    pub async fn load(path: &Path) -> Result<Self, CardIndexError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CardIndexError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Self::parse(&content)
    }

    /// Parse card definitions. Entries without a `dbfId` (heroes, enchantments)
    /// are skipped; any other malformed entry fails the whole file.
    pub fn parse(content: &str) -> Result<Self, CardIndexError> {
        let raw: Vec<serde_json::Value> = serde_json::from_str(content)?;

        let mut index = Self::new();
        let mut skipped = 0;
        for value in raw {
            if value.get("dbfId").is_none() {
                skipped += 1;
                continue;
            }
            index.add_card(serde_json::from_value(value)?);
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} card entries without a dbfId", skipped);
        }
        Ok(index)
    }

    pub fn add_card(&mut self, card: CardDefinition) {
        self.cards.insert(card.dbf_id, card);
    }

    pub fn get(&self, dbf_id: i64) -> Option<&CardDefinition> {
        self.cards.get(&dbf_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardLookup for CardIndex {
    fn card_by_dbf_id(&self, dbf_id: i64) -> Result<CardDefinition, ImportError> {
        self.get(dbf_id)
            .cloned()
            .ok_or(ImportError::UnknownCard(dbf_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARDS_JSON: &str = r#"[
        {"dbfId": 100, "id": "CS2_029", "name": "Fireball", "cardClass": "MAGE", "cost": 4},
        {"dbfId": 205, "id": "CS2_024", "name": "Frostbolt", "cardClass": "MAGE", "cost": 2},
        {"id": "HERO_08", "name": "Jaina Proudmoore"}
    ]"#;

    #[test]
    fn test_parse_skips_entries_without_dbf_id() {
        let index = CardIndex::parse(CARDS_JSON).unwrap();
        assert_eq!(index.len(), 2);

        let fireball = index.card_by_dbf_id(100).unwrap();
        assert_eq!(fireball.name, "Fireball");
        assert_eq!(fireball.cost, Some(4));
    }

    #[test]
    fn test_parse_rejects_malformed_card_with_dbf_id() {
        let result = CardIndex::parse(
            r#"[
                {"dbfId": 100, "id": "CS2_029", "name": "Fireball", "cost": 4},
                {"dbfId": 101, "id": "CS2_032", "name": "Flamestrike", "cost": "seven"}
            ]"#,
        );
        assert!(matches!(result, Err(CardIndexError::Parse(_))));

        let missing_name = CardIndex::parse(r#"[{"dbfId": 100, "id": "CS2_029"}]"#);
        assert!(matches!(missing_name, Err(CardIndexError::Parse(_))));
    }

    #[test]
    fn test_unknown_dbf_id() {
        let index = CardIndex::parse(CARDS_JSON).unwrap();
        assert!(matches!(
            index.card_by_dbf_id(1),
            Err(ImportError::UnknownCard(1))
        ));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            CardIndex::parse(r#"{"cards": []}"#),
            Err(CardIndexError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cards.json");
        tokio::fs::write(&path, CARDS_JSON).await.unwrap();

        let index = CardIndex::load(&path).await.unwrap();
        assert_eq!(index.get(205).unwrap().id, "CS2_024");

        let missing = CardIndex::load(&dir.path().join("nope.json")).await;
        assert!(matches!(missing, Err(CardIndexError::Io { .. })));
    }
}
