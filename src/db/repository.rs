//! Database repository for the deck catalog.
//!
//! Uses prepared statements and transactions for data integrity.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use super::CatalogStore;
use crate::errors::AppError;
use crate::models::{CatalogDeck, DeckCard, NormalizedDeck};

const DECK_COLUMNS: &str = "id, name, class_name, archetype_id, cards, tags, archived, win_rate, total_games, source_deck_id, created_at";

/// Revision information for change detection.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub generated_at: String,
}

/// Database repository for all catalog operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    /// Get revision info.
    pub async fn get_revision_info(&self) -> Result<RevisionInfo, AppError> {
        let row = sqlx::query("SELECT revision_id, generated_at FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(RevisionInfo {
            revision_id: row.get("revision_id"),
            generated_at: row.get("generated_at"),
        })
    }

    /// Increment the revision ID and return the new value.
    pub async fn increment_revision(&self) -> Result<i64, AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
            .bind(&now)
            .execute(&self.pool)
            .await?;
        self.get_revision_id().await
    }

    /// List decks in insertion order, optionally only those carrying `tag`.
    pub async fn list_decks(&self, tag: Option<&str>) -> Result<Vec<CatalogDeck>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM decks
             WHERE ?1 IS NULL OR EXISTS (SELECT 1 FROM json_each(decks.tags) WHERE json_each.value = ?1)
             ORDER BY rowid",
            DECK_COLUMNS
        ))
        .bind(tag)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(deck_from_row).collect()
    }

    /// Get a deck by ID.
    pub async fn get_deck(&self, id: &str) -> Result<Option<CatalogDeck>, AppError> {
        let row = sqlx::query(&format!("SELECT {} FROM decks WHERE id = ?", DECK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(deck_from_row).transpose()
    }

    /// Count decks carrying `tag`.
    pub async fn count_with_tag(&self, tag: &str) -> Result<i64, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM decks
             WHERE EXISTS (SELECT 1 FROM json_each(decks.tags) WHERE json_each.value = ?)",
        )
        .bind(tag)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("n"))
    }

    /// Insert a deck.
    pub async fn insert_deck(
        &self,
        name: &str,
        deck: &NormalizedDeck,
        archived: bool,
        tags: &[&str],
    ) -> Result<CatalogDeck, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = deck.created_at.to_rfc3339();
        let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        let cards_json = serde_json::to_string(&deck.cards)?;
        let tags_json = serde_json::to_string(&tags)?;
        let total_games = deck
            .total_games
            .map(|n| {
                i64::try_from(n)
                    .map_err(|_| AppError::BadRequest(format!("total_games out of range: {}", n)))
            })
            .transpose()?;

        sqlx::query(&format!(
            "INSERT INTO decks ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            DECK_COLUMNS
        ))
        .bind(&id)
        .bind(name)
        .bind(deck.class.local_name())
        .bind(&deck.archetype_id)
        .bind(&cards_json)
        .bind(&tags_json)
        .bind(archived as i32)
        .bind(deck.win_rate)
        .bind(total_games)
        .bind(&deck.source_deck_id)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        Ok(CatalogDeck {
            id,
            name: name.to_string(),
            class_name: deck.class.local_name().to_string(),
            archetype_id: deck.archetype_id.clone(),
            cards: deck.cards.clone(),
            tags,
            archived,
            win_rate: deck.win_rate,
            total_games: deck.total_games,
            source_deck_id: deck.source_deck_id.clone(),
            created_at,
        })
    }

    /// Delete every deck carrying `tag` in one transaction.
    pub async fn delete_decks_with_tag(&self, tag: &str) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "DELETE FROM decks
             WHERE EXISTS (SELECT 1 FROM json_each(decks.tags) WHERE json_each.value = ?)",
        )
        .bind(tag)
        .execute(&mut *tx)
        .await?;

        let deleted = result.rows_affected();
        if deleted > 0 {
            let now = Utc::now().to_rfc3339();
            sqlx::query(
                "UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1",
            )
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }

    /// Mark a consistent catalog revision and checkpoint the WAL.
    pub async fn flush(&self) -> Result<i64, AppError> {
        let revision = self.increment_revision().await?;
        sqlx::query("PRAGMA wal_checkpoint(PASSIVE)")
            .execute(&self.pool)
            .await?;
        Ok(revision)
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn add_deck(
        &self,
        name: &str,
        deck: &NormalizedDeck,
        auto_archive: bool,
        tags: &[&str],
    ) -> Result<CatalogDeck, AppError> {
        self.insert_deck(name, deck, auto_archive, tags).await
    }

    async fn delete_all_with_tag(&self, tag: &str) -> Result<u64, AppError> {
        self.delete_decks_with_tag(tag).await
    }

    async fn persist(&self) -> Result<(), AppError> {
        let revision = self.flush().await?;
        tracing::debug!("Catalog flushed at revision {}", revision);
        Ok(())
    }
}

// Helper functions for row conversion

fn deck_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<CatalogDeck, AppError> {
    let archived: i32 = row.get("archived");
    let cards_str: String = row.get("cards");
    let tags_str: String = row.get("tags");
    let total_games: Option<i64> = row.get("total_games");
    let total_games = total_games
        .map(|n| {
            u64::try_from(n)
                .map_err(|_| AppError::Database(format!("negative total_games: {}", n)))
        })
        .transpose()?;

    Ok(CatalogDeck {
        id: row.get("id"),
        name: row.get("name"),
        class_name: row.get("class_name"),
        archetype_id: row.get("archetype_id"),
        cards: parse_cards(&cards_str),
        tags: serde_json::from_str(&tags_str).unwrap_or_default(),
        archived: archived != 0,
        win_rate: row.get("win_rate"),
        total_games,
        source_deck_id: row.get("source_deck_id"),
        created_at: row.get("created_at"),
    })
}

fn parse_cards(s: &str) -> Vec<DeckCard> {
    serde_json::from_str(s).unwrap_or_default()
}
