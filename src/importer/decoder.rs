//! Decoder for the compact `[[dbfId, count], ...]` card list encoding.

use serde_json::Value;

use super::ImportError;
use crate::cards::CardLookup;
use crate::models::DeckCard;

/// Decode a card list, resolving every dbfId through the card database.
/// Output keeps input order. Unknown ids fail with the lookup's own error.
pub fn decode_card_list(
    encoding: &str,
    cards: &dyn CardLookup,
) -> Result<Vec<DeckCard>, ImportError> {
    parse_pairs(encoding)?
        .into_iter()
        .map(|(dbf_id, count)| {
            let card = cards.card_by_dbf_id(dbf_id)?;
            Ok(DeckCard {
                dbf_id,
                card_id: card.id,
                name: card.name,
                count,
            })
        })
        .collect()
}

/// Parse the encoding into `(dbfId, count)` pairs without touching the card database.
pub fn parse_pairs(encoding: &str) -> Result<Vec<(i64, u32)>, ImportError> {
    let value: Value = serde_json::from_str(encoding)
        .map_err(|e| ImportError::MalformedCardList(format!("not JSON: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(ImportError::MalformedCardList(
            "expected an array of pairs".to_string(),
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_pair(index, item))
        .collect()
}

fn parse_pair(index: usize, item: &Value) -> Result<(i64, u32), ImportError> {
    let malformed = |reason: &str| {
        ImportError::MalformedCardList(format!("entry {}: {} ({})", index, reason, item))
    };

    let pair = match item.as_array() {
        Some(pair) if pair.len() == 2 => pair,
        _ => return Err(malformed("expected [dbfId, count]")),
    };

    let dbf_id = pair[0]
        .as_i64()
        .ok_or_else(|| malformed("dbfId is not an integer"))?;
    let count = pair[1]
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| malformed("count is not a positive integer"))?;

    Ok((dbf_id, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardIndex;
    use crate::models::CardDefinition;

    /// Answers every id with a placeholder card.
    struct AnyCard;

    impl CardLookup for AnyCard {
        fn card_by_dbf_id(&self, dbf_id: i64) -> Result<CardDefinition, ImportError> {
            Ok(CardDefinition {
                dbf_id,
                id: format!("CARD_{}", dbf_id),
                name: format!("Card {}", dbf_id),
                card_class: None,
                cost: None,
            })
        }
    }

    #[test]
    fn test_decode_keeps_order_and_counts() {
        let cards = decode_card_list("[[100,2],[205,1]]", &AnyCard).unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!((cards[0].dbf_id, cards[0].count), (100, 2));
        assert_eq!((cards[1].dbf_id, cards[1].count), (205, 1));
        assert_eq!(cards[0].card_id, "CARD_100");
    }

    #[test]
    fn test_decode_empty_list() {
        assert!(decode_card_list("[]", &AnyCard).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_encodings() {
        for encoding in [
            "",
            "not json",
            "{\"100\": 2}",
            "[[100]]",
            "[[100,2,3]]",
            "[[\"100\",2]]",
            "[[100,1.5]]",
            "[[100,0]]",
            "[[100,-1]]",
            "[100,2]",
        ] {
            assert!(
                matches!(
                    decode_card_list(encoding, &AnyCard),
                    Err(ImportError::MalformedCardList(_))
                ),
                "expected {encoding:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_unknown_card_propagates() {
        let index = CardIndex::from_cards([CardDefinition {
            dbf_id: 100,
            id: "CS2_029".to_string(),
            name: "Fireball".to_string(),
            card_class: Some("MAGE".to_string()),
            cost: Some(4),
        }]);

        let err = decode_card_list("[[100,2],[999,1]]", &index).unwrap_err();
        assert!(matches!(err, ImportError::UnknownCard(999)));
    }
}
