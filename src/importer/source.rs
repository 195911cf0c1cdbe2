//! Snapshot fetching and decoding of the two remote datasets.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::ImportError;
use crate::models::{ArchetypeRecord, RawDeckEntry};

/// Where snapshot documents come from.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch a document as text. Any failure is an `ImportError::Network`.
    async fn fetch_text(&self, url: &str) -> Result<String, ImportError>;
}

/// Fetches snapshots over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self, ImportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ImportError::Network {
                url: String::new(),
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    async fn fetch_text(&self, url: &str) -> Result<String, ImportError> {
        let network = |message: String| ImportError::Network {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(network(format!("HTTP {}", status)));
        }

        response.text().await.map_err(|e| network(e.to_string()))
    }
}

/// Serves literal documents keyed by URL. Unknown URLs fail like an unreachable host.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    documents: HashMap<String, String>,
    latency: Duration,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents.insert(url.into(), body.into());
        self
    }

    /// Delay every fetch, like a slow upstream.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl SnapshotSource for FixtureSource {
    async fn fetch_text(&self, url: &str) -> Result<String, ImportError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| ImportError::Network {
                url: url.to_string(),
                message: "no fixture for url".to_string(),
            })
    }
}

/// Extract every deck entry under `series.data.*`, in document order.
/// Each entry remembers the class key it was listed under.
pub fn parse_decks_snapshot(json: &str) -> Result<Vec<RawDeckEntry>, ImportError> {
    let root: Value = serde_json::from_str(json)
        .map_err(|e| ImportError::InvalidSnapshot(format!("decks document: {}", e)))?;

    let data = root
        .pointer("/series/data")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            ImportError::InvalidSnapshot("decks document has no series.data object".to_string())
        })?;

    let mut entries = Vec::new();
    for (class_code, group) in data {
        let group = group.as_array().ok_or_else(|| {
            ImportError::InvalidSnapshot(format!("series.data.{} is not an array", class_code))
        })?;

        for item in group {
            let mut entry: RawDeckEntry = serde_json::from_value(item.clone()).map_err(|e| {
                ImportError::InvalidSnapshot(format!("deck entry under {}: {}", class_code, e))
            })?;
            entry.listed_class = Some(class_code.clone());
            entries.push(entry);
        }
    }

    Ok(entries)
}

/// Decode the archetype list document.
pub fn parse_archetypes(json: &str) -> Result<Vec<ArchetypeRecord>, ImportError> {
    serde_json::from_str(json)
        .map_err(|e| ImportError::InvalidSnapshot(format!("archetypes document: {}", e)))
}
