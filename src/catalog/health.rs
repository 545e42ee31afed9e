//! Health, mana and chicken threshold fields of a config override

use crate::error::SequenceError;
use std::str::FromStr;

/// Threshold field a config override can set, as a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthField {
    HealingPotionAt,
    ManaPotionAt,
    RejuvPotionAtLife,
    RejuvPotionAtMana,
    MercHealingPotionAt,
    MercRejuvPotionAt,
    ChickenAt,
    TownChickenAt,
    MercChickenAt,
}

/// Number of health fields
pub const HEALTH_FIELD_COUNT: usize = 9;

/// Definition of a health field: wire key plus the labels the view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthFieldDef {
    pub field: HealthField,
    pub key: &'static str,
    pub edit_label: &'static str,
    pub summary_label: &'static str,
}

/// Health fields in display order
pub static HEALTH_FIELDS: [HealthFieldDef; HEALTH_FIELD_COUNT] = [
    HealthFieldDef {
        field: HealthField::HealingPotionAt,
        key: "healingPotionAt",
        edit_label: "Healing Potion At",
        summary_label: "Heal",
    },
    HealthFieldDef {
        field: HealthField::ManaPotionAt,
        key: "manaPotionAt",
        edit_label: "Mana Potion At",
        summary_label: "Mana",
    },
    HealthFieldDef {
        field: HealthField::RejuvPotionAtLife,
        key: "rejuvPotionAtLife",
        edit_label: "Rejuv Potion At Life",
        summary_label: "Rejuv HP",
    },
    HealthFieldDef {
        field: HealthField::RejuvPotionAtMana,
        key: "rejuvPotionAtMana",
        edit_label: "Rejuv Potion At Mana",
        summary_label: "Rejuv Mana",
    },
    HealthFieldDef {
        field: HealthField::MercHealingPotionAt,
        key: "mercHealingPotionAt",
        edit_label: "Merc Healing Potion At",
        summary_label: "Merc Heal",
    },
    HealthFieldDef {
        field: HealthField::MercRejuvPotionAt,
        key: "mercRejuvPotionAt",
        edit_label: "Merc Rejuv Potion At",
        summary_label: "Merc Rejuv",
    },
    HealthFieldDef {
        field: HealthField::ChickenAt,
        key: "chickenAt",
        edit_label: "Chicken At",
        summary_label: "Chicken",
    },
    HealthFieldDef {
        field: HealthField::TownChickenAt,
        key: "townChickenAt",
        edit_label: "Town Chicken At",
        summary_label: "Town",
    },
    HealthFieldDef {
        field: HealthField::MercChickenAt,
        key: "mercChickenAt",
        edit_label: "Merc Chicken At",
        summary_label: "Merc Chicken",
    },
];

impl HealthField {
    /// Position in [`HEALTH_FIELDS`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn def(self) -> &'static HealthFieldDef {
        &HEALTH_FIELDS[self.index()]
    }

    #[inline]
    pub fn key(self) -> &'static str {
        self.def().key
    }
}

impl FromStr for HealthField {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HEALTH_FIELDS
            .iter()
            .find(|def| def.key == s)
            .map(|def| def.field)
            .ok_or_else(|| SequenceError::UnknownHealthField(s.to_string()))
    }
}
