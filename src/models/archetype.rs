//! Archetype and raw deck shapes served by the snapshot endpoints.

use serde::{Deserialize, Deserializer, Serialize};

/// Archetype metadata from the archetype list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Vendor class code, e.g. `DEMONHUNTER`
    #[serde(rename = "player_class_name")]
    pub class_code: String,
    #[serde(rename = "name")]
    pub display_name: String,
}

impl ArchetypeRecord {
    pub fn new(id: &str, class_code: &str, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            class_code: class_code.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

/// One entry of the decks-by-winrate dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDeckEntry {
    #[serde(default, deserialize_with = "optional_id_string")]
    pub deck_id: Option<String>,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub archetype_id: Option<String>,
    /// Card list encoded as a JSON array of `[dbfId, count]` pairs
    #[serde(rename = "deck_list")]
    pub card_list: String,
    #[serde(default)]
    pub win_rate: Option<f64>,
    #[serde(default)]
    pub total_games: Option<u64>,
    /// Vendor class code of the envelope group this entry was listed under
    #[serde(skip)]
    pub listed_class: Option<String>,
}

/// The service emits ids as JSON numbers or strings depending on endpoint.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Int(i64),
}

impl From<IdRepr> for String {
    fn from(id: IdRepr) -> Self {
        match id {
            IdRepr::Text(s) => s,
            IdRepr::Int(n) => n.to_string(),
        }
    }
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    IdRepr::deserialize(deserializer).map(String::from)
}

fn optional_id_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<IdRepr>::deserialize(deserializer)?.map(String::from))
}
