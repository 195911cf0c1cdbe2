//! Builds one normalized deck per snapshot entry.

use chrono::Utc;

use super::{decode_card_list, ArchetypeTable, HeroClass, ImportError};
use crate::cards::CardLookup;
use crate::models::{NormalizedDeck, RawDeckEntry};

/// Assemble a deck from a snapshot entry.
///
/// Decks whose archetype is unknown take their class from the envelope group
/// they were listed under; without one the entry fails as `UnmappedClass`.
pub fn assemble_deck(
    entry: &RawDeckEntry,
    archetypes: &ArchetypeTable,
    cards: &dyn CardLookup,
    shorten_titles: bool,
) -> Result<NormalizedDeck, ImportError> {
    let archetype = archetypes.resolve(entry.archetype_id.as_deref());

    let class = match HeroClass::from_vendor_code(&archetype.class_code) {
        Ok(class) => class,
        Err(err) if archetypes.is_unknown(archetype) => match entry.listed_class.as_deref() {
            Some(code) => HeroClass::from_vendor_code(code)?,
            None => return Err(err),
        },
        Err(err) => return Err(err),
    };

    let cards = decode_card_list(&entry.card_list, cards)?;

    let name = if shorten_titles {
        shorten_title(&archetype.display_name, class)
    } else {
        archetype.display_name.clone()
    };

    Ok(NormalizedDeck {
        name,
        class,
        archetype_id: entry.archetype_id.clone(),
        cards,
        source_deck_id: entry.deck_id.clone(),
        win_rate: entry.win_rate,
        total_games: entry.total_games,
        created_at: Utc::now(),
    })
}

/// Assemble every entry in order, keeping per-entry failures.
pub fn assemble_all(
    entries: &[RawDeckEntry],
    archetypes: &ArchetypeTable,
    cards: &dyn CardLookup,
    shorten_titles: bool,
) -> Vec<Result<NormalizedDeck, ImportError>> {
    entries
        .iter()
        .map(|entry| assemble_deck(entry, archetypes, cards, shorten_titles))
        .collect()
}

/// Remove the class name from a deck title, e.g. `Control Warrior` => `Control`.
///
/// Runs to a fixed point so shortening twice changes nothing. A title that
/// would become empty is kept as is.
pub fn shorten_title(title: &str, class: HeroClass) -> String {
    let mut current = collapse_spaces(title);
    loop {
        let next = collapse_spaces(
            &current
                .replace(class.local_name(), " ")
                .replace(class.display_name(), " "),
        );
        if next == current {
            break;
        }
        current = next;
    }

    if current.is_empty() {
        collapse_spaces(title)
    } else {
        current
    }
}

fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArchetypeRecord, CardDefinition};

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

    fn entry(archetype_id: Option<&str>, listed_class: Option<&str>, cards: &str) -> RawDeckEntry {
        RawDeckEntry {
            deck_id: Some("deck".to_string()),
            archetype_id: archetype_id.map(str::to_string),
            card_list: cards.to_string(),
            win_rate: Some(51.5),
            total_games: Some(1200),
            listed_class: listed_class.map(str::to_string),
        }
    }

    fn table() -> ArchetypeTable {
        ArchetypeTable::build(vec![
            ArchetypeRecord::new("10", "WARRIOR", "Control Warrior"),
            ArchetypeRecord::new("11", "DEMONHUNTER", "Aggro Demon Hunter"),
        ])
        .unwrap()
    }

    #[test]
    fn test_assemble_remote_archetype() {
        let deck = assemble_deck(
            &entry(Some("10"), Some("WARRIOR"), "[[1,2],[2,1]]"),
            &table(),
            &AnyCard,
            false,
        )
        .unwrap();

        assert_eq!(deck.name, "Control Warrior");
        assert_eq!(deck.class, HeroClass::Warrior);
        assert_eq!(deck.card_count(), 3);
        assert_eq!(deck.archetype_id.as_deref(), Some("10"));
        assert_eq!(deck.win_rate, Some(51.5));
    }

    #[test]
    fn test_shortening_only_touches_name() {
        let raw = entry(Some("11"), None, "[[1,2]]");
        let long = assemble_deck(&raw, &table(), &AnyCard, false).unwrap();
        let short = assemble_deck(&raw, &table(), &AnyCard, true).unwrap();

        assert_eq!(long.name, "Aggro Demon Hunter");
        assert_eq!(short.name, "Aggro");
        assert_eq!(short.class, long.class);
        assert_eq!(short.cards, long.cards);
    }

    #[test]
    fn test_unknown_archetype_uses_listed_class() {
        let deck = assemble_deck(&entry(Some("404"), Some("PRIEST"), "[]"), &table(), &AnyCard, false)
            .unwrap();

        assert_eq!(deck.name, "Unknown");
        assert_eq!(deck.class, HeroClass::Priest);
    }

    #[test]
    fn test_unknown_archetype_without_listed_class_fails() {
        let err =
            assemble_deck(&entry(Some("404"), None, "[]"), &table(), &AnyCard, false).unwrap_err();
        assert!(matches!(err, ImportError::UnmappedClass(code) if code == "UNKNOWN"));

        let err = assemble_deck(&entry(None, Some("NEUTRAL"), "[]"), &table(), &AnyCard, false)
            .unwrap_err();
        assert!(matches!(err, ImportError::UnmappedClass(code) if code == "NEUTRAL"));
    }

    #[test]
    fn test_assemble_all_reports_per_entry() {
        let entries = vec![
            entry(Some("10"), None, "[[1,1]]"),
            entry(Some("10"), None, "[[1]]"),
            entry(Some("-2"), None, "[[1,1]]"),
        ];

        let results = assemble_all(&entries, &table(), &AnyCard, false);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ImportError::MalformedCardList(_))));
        assert_eq!(results[2].as_ref().unwrap().name, "Druid Unknown");
    }

    #[test]
    fn test_shorten_title_examples() {
        assert_eq!(shorten_title("Control Warrior", HeroClass::Warrior), "Control");
        assert_eq!(shorten_title("Demon Hunter Unknown", HeroClass::DemonHunter), "Unknown");
        assert_eq!(shorten_title("Big  Spell Mage", HeroClass::Mage), "Big Spell");
        assert_eq!(shorten_title("Odd Paladin Aggro", HeroClass::Paladin), "Odd Aggro");
        assert_eq!(shorten_title("Warrior", HeroClass::Warrior), "Warrior");
        assert_eq!(shorten_title("Quest Rogue", HeroClass::Mage), "Quest Rogue");
    }

    #[test]
    fn test_shorten_title_is_idempotent() {
        let titles = [
            "Control Warrior",
            "  Aggro   Demon Hunter ",
            "DemonHunter Tempo",
            "Demon  Hunter Big",
            "MaMagege",
            "Mage",
            "Highlander Hunter",
            "",
        ];

        for class in HeroClass::ALL {
            for title in titles {
                let once = shorten_title(title, class);
                assert_eq!(shorten_title(&once, class), once, "{title:?} / {class}");
                assert!(!once.starts_with(' ') && !once.ends_with(' '));
                assert!(!once.contains("  "));
            }
        }
    }
}
