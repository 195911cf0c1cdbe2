//! Archetype lookup merged from the remote archetype list and the sentinel fallbacks.

use std::collections::HashMap;

use super::{HeroClass, ImportError};
use crate::models::ArchetypeRecord;

/// Archetypes the snapshot service uses for decks it could not classify.
/// Each negative id stands for "a deck of this class with no archetype".
const SENTINEL_ARCHETYPES: [(&str, HeroClass, &str); 10] = [
    ("-2", HeroClass::Druid, "Druid Unknown"),
    ("-3", HeroClass::Hunter, "Hunter Unknown"),
    ("-4", HeroClass::Mage, "Mage Unknown"),
    ("-5", HeroClass::Paladin, "Paladin Unknown"),
    ("-6", HeroClass::Priest, "Priest Unknown"),
    ("-7", HeroClass::Rogue, "Rogue Unknown"),
    ("-8", HeroClass::Shaman, "Shaman Unknown"),
    ("-9", HeroClass::Warlock, "Warlock Unknown"),
    ("-10", HeroClass::Warrior, "Warrior Unknown"),
    ("-14", HeroClass::DemonHunter, "Demon Hunter Unknown"),
];

/// Class code of the fallback record. Deliberately outside the class table.
pub const UNKNOWN_CLASS_CODE: &str = "UNKNOWN";
pub const UNKNOWN_ARCHETYPE_NAME: &str = "Unknown";

/// Sentinel records in table order.
pub fn sentinel_archetypes() -> Vec<ArchetypeRecord> {
    SENTINEL_ARCHETYPES
        .iter()
        .map(|(id, class, name)| ArchetypeRecord::new(id, class.vendor_code(), name))
        .collect()
}

/// Read-only archetype lookup built once per import run.
#[derive(Debug, Clone)]
pub struct ArchetypeTable {
    by_id: HashMap<String, ArchetypeRecord>,
    unknown: ArchetypeRecord,
}

impl ArchetypeTable {
    /// Merge remote archetypes with the sentinels. Remote records win on id
    /// collisions; among duplicate remote ids the last one wins.
    ///
    /// Fails if a remote record carries a class code the class table cannot map.
    pub fn build(remote: Vec<ArchetypeRecord>) -> Result<Self, ImportError> {
        let mut by_id = HashMap::with_capacity(remote.len() + SENTINEL_ARCHETYPES.len());

        for record in remote {
            HeroClass::from_vendor_code(&record.class_code)?;
            if let Some(previous) = by_id.insert(record.id.clone(), record) {
                tracing::warn!(
                    "Duplicate archetype id {} in remote list, replacing '{}'",
                    previous.id,
                    previous.display_name
                );
            }
        }

        for sentinel in sentinel_archetypes() {
            by_id.entry(sentinel.id.clone()).or_insert(sentinel);
        }

        Ok(Self {
            by_id,
            unknown: ArchetypeRecord::new("", UNKNOWN_CLASS_CODE, UNKNOWN_ARCHETYPE_NAME),
        })
    }

    /// Resolve an archetype id. Missing or unmatched ids yield the Unknown record.
    pub fn resolve(&self, id: Option<&str>) -> &ArchetypeRecord {
        id.and_then(|id| self.by_id.get(id))
            .unwrap_or(&self.unknown)
    }

    pub fn is_unknown(&self, record: &ArchetypeRecord) -> bool {
        std::ptr::eq(record, &self.unknown)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_cover_absent_ids() {
        let table = ArchetypeTable::build(vec![]).unwrap();
        assert_eq!(table.len(), 10);

        for (id, class, name) in SENTINEL_ARCHETYPES {
            let record = table.resolve(Some(id));
            assert_eq!(record.id, id);
            assert_eq!(record.display_name, name);
            assert_eq!(record.class_code, class.vendor_code());
            assert!(!table.is_unknown(record));
        }

        assert_eq!(table.resolve(Some("-14")).display_name, "Demon Hunter Unknown");
        assert_eq!(table.resolve(Some("-3")).display_name, "Hunter Unknown");
    }

    #[test]
    fn test_remote_record_overrides_sentinel() {
        let table = ArchetypeTable::build(vec![
            ArchetypeRecord::new("-4", "MAGE", "Big Spell Mage"),
            ArchetypeRecord::new("77", "PRIEST", "Control Priest"),
        ])
        .unwrap();

        assert_eq!(table.len(), 11);
        assert_eq!(table.resolve(Some("-4")).display_name, "Big Spell Mage");
        assert_eq!(table.resolve(Some("77")).display_name, "Control Priest");
        assert_eq!(table.resolve(Some("-5")).display_name, "Paladin Unknown");
    }

    #[test]
    fn test_unmatched_ids_resolve_to_unknown() {
        let table =
            ArchetypeTable::build(vec![ArchetypeRecord::new("1", "ROGUE", "Miracle Rogue")])
                .unwrap();

        for id in [Some("999"), Some("-1"), Some(""), None] {
            let record = table.resolve(id);
            assert!(table.is_unknown(record));
            assert_eq!(record.display_name, "Unknown");
            assert_eq!(record.class_code, "UNKNOWN");
        }
    }

    #[test]
    fn test_duplicate_remote_ids_last_wins() {
        let table = ArchetypeTable::build(vec![
            ArchetypeRecord::new("5", "WARLOCK", "Zoo Warlock"),
            ArchetypeRecord::new("5", "WARLOCK", "Handlock"),
        ])
        .unwrap();

        assert_eq!(table.resolve(Some("5")).display_name, "Handlock");
    }

    #[test]
    fn test_unmappable_remote_class_fails_build() {
        let err = ArchetypeTable::build(vec![
            ArchetypeRecord::new("1", "DRUID", "Token Druid"),
            ArchetypeRecord::new("2", "NEUTRAL", "Mystery"),
        ])
        .unwrap_err();

        assert!(matches!(err, ImportError::UnmappedClass(code) if code == "NEUTRAL"));
    }
}
