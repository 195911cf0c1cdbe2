//! Card definition model, in the HearthstoneJSON `cards.json` shape.

use serde::{Deserialize, Serialize};

/// A card known to the local card database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDefinition {
    /// Numeric database id used by deck-list encodings
    pub dbf_id: i64,
    /// Stable string id, e.g. `EX1_277`
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<i32>,
}
