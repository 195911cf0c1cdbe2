//! Vendor class code to local class taxonomy.

use std::fmt;

use serde::{Serialize, Serializer};

use super::ImportError;

/// A playable class in the local taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeroClass {
    Druid,
    Hunter,
    Mage,
    Paladin,
    Priest,
    Rogue,
    Shaman,
    Warlock,
    Warrior,
    DemonHunter,
}

/// Vendor code and local name for every playable class.
const CLASS_TABLE: [(&str, HeroClass); 10] = [
    ("DRUID", HeroClass::Druid),
    ("HUNTER", HeroClass::Hunter),
    ("MAGE", HeroClass::Mage),
    ("PALADIN", HeroClass::Paladin),
    ("PRIEST", HeroClass::Priest),
    ("ROGUE", HeroClass::Rogue),
    ("SHAMAN", HeroClass::Shaman),
    ("WARLOCK", HeroClass::Warlock),
    ("WARRIOR", HeroClass::Warrior),
    ("DEMONHUNTER", HeroClass::DemonHunter),
];

impl HeroClass {
    pub const ALL: [HeroClass; 10] = [
        HeroClass::Druid,
        HeroClass::Hunter,
        HeroClass::Mage,
        HeroClass::Paladin,
        HeroClass::Priest,
        HeroClass::Rogue,
        HeroClass::Shaman,
        HeroClass::Warlock,
        HeroClass::Warrior,
        HeroClass::DemonHunter,
    ];

    /// Map a vendor class code. Matching is exact.
    pub fn from_vendor_code(code: &str) -> Result<Self, ImportError> {
        CLASS_TABLE
            .iter()
            .find(|(vendor, _)| *vendor == code)
            .map(|(_, class)| *class)
            .ok_or_else(|| ImportError::UnmappedClass(code.to_string()))
    }

    pub fn vendor_code(&self) -> &'static str {
        match self {
            HeroClass::Druid => "DRUID",
            HeroClass::Hunter => "HUNTER",
            HeroClass::Mage => "MAGE",
            HeroClass::Paladin => "PALADIN",
            HeroClass::Priest => "PRIEST",
            HeroClass::Rogue => "ROGUE",
            HeroClass::Shaman => "SHAMAN",
            HeroClass::Warlock => "WARLOCK",
            HeroClass::Warrior => "WARRIOR",
            HeroClass::DemonHunter => "DEMONHUNTER",
        }
    }

    /// Name used by the local catalog.
    pub fn local_name(&self) -> &'static str {
        match self {
            HeroClass::Druid => "Druid",
            HeroClass::Hunter => "Hunter",
            HeroClass::Mage => "Mage",
            HeroClass::Paladin => "Paladin",
            HeroClass::Priest => "Priest",
            HeroClass::Rogue => "Rogue",
            HeroClass::Shaman => "Shaman",
            HeroClass::Warlock => "Warlock",
            HeroClass::Warrior => "Warrior",
            HeroClass::DemonHunter => "DemonHunter",
        }
    }

    /// Human-facing name; differs from the local name only for two-word classes.
    pub fn display_name(&self) -> &'static str {
        match self {
            HeroClass::DemonHunter => "Demon Hunter",
            other => other.local_name(),
        }
    }
}

impl fmt::Display for HeroClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

impl Serialize for HeroClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.local_name())
    }
}
