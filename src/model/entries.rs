//! Strict entry types of a difficulty's settings

use crate::catalog::{HealthField, HEALTH_FIELDS, HEALTH_FIELD_COUNT};
use crate::coerce::finite;

const SUMMARY_SEPARATOR: &str = " • ";

// ============================================================================
// Run entries
// ============================================================================

/// One scheduled automation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunEntry {
    /// Run identifier, e.g. `"pit"`; entries with an empty name are dropped
    pub run: String,
    pub min_level: Option<f64>,
    pub max_level: Option<f64>,
    pub low_gold_run: bool,
    pub skip_town_chores: bool,
    pub exit_game: bool,
    pub stop_if_check_fails: bool,
}

/// Behavior flag of a run entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunFlag {
    LowGoldRun,
    SkipTownChores,
    ExitGame,
    StopIfCheckFails,
}

pub const RUN_FLAGS: [RunFlag; 4] = [
    RunFlag::LowGoldRun,
    RunFlag::SkipTownChores,
    RunFlag::ExitGame,
    RunFlag::StopIfCheckFails,
];

impl RunFlag {
    /// Wire name of the flag
    pub const fn key(self) -> &'static str {
        match self {
            RunFlag::LowGoldRun => "lowGoldRun",
            RunFlag::SkipTownChores => "skipTownChores",
            RunFlag::ExitGame => "exitGame",
            RunFlag::StopIfCheckFails => "stopIfCheckFails",
        }
    }
}

impl RunEntry {
    pub fn new(run: impl Into<String>) -> Self {
        Self {
            run: run.into(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn has_run(&self) -> bool {
        !self.run.is_empty()
    }

    pub fn flag(&self, flag: RunFlag) -> bool {
        match flag {
            RunFlag::LowGoldRun => self.low_gold_run,
            RunFlag::SkipTownChores => self.skip_town_chores,
            RunFlag::ExitGame => self.exit_game,
            RunFlag::StopIfCheckFails => self.stop_if_check_fails,
        }
    }

    pub fn set_flag(&mut self, flag: RunFlag, enabled: bool) {
        match flag {
            RunFlag::LowGoldRun => self.low_gold_run = enabled,
            RunFlag::SkipTownChores => self.skip_town_chores = enabled,
            RunFlag::ExitGame => self.exit_game = enabled,
            RunFlag::StopIfCheckFails => self.stop_if_check_fails = enabled,
        }
    }
}

// ============================================================================
// Config overrides
// ============================================================================

/// Threshold percentages of a config override, one slot per [`HealthField`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HealthSettings([Option<f64>; HEALTH_FIELD_COUNT]);

impl HealthSettings {
    #[inline]
    pub fn get(&self, field: HealthField) -> Option<f64> {
        self.0[field.index()]
    }

    #[inline]
    pub fn set(&mut self, field: HealthField, value: Option<f64>) {
        self.0[field.index()] = finite(value);
    }

    /// Defined fields in display order
    pub fn iter_defined(&self) -> impl Iterator<Item = (HealthField, f64)> + '_ {
        HEALTH_FIELDS
            .iter()
            .filter_map(|def| self.get(def.field).map(|v| (def.field, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

/// Level-gated bundle of health/mana/chicken threshold overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrideEntry {
    /// Character level the override applies from
    pub level: Option<f64>,
    pub health_settings: HealthSettings,
}

impl ConfigOverrideEntry {
    /// True when the entry would serialize to nothing
    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.health_settings.is_empty()
    }

    /// One-line summary, e.g. `Level ≥ 40 • Heal @ 60%`
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(level) = self.level {
            parts.push(format!("Level ≥ {}", level));
        }
        for (field, value) in self.health_settings.iter_defined() {
            parts.push(format!("{} @ {}%", field.def().summary_label, value));
        }
        if parts.is_empty() {
            "No adjustments".to_string()
        } else {
            parts.join(SUMMARY_SEPARATOR)
        }
    }
}

// ============================================================================
// Difficulty conditions
// ============================================================================

/// Thresholds gating a move between two tiers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionEntry {
    pub level: Option<f64>,
    pub fire_res: Option<f64>,
    pub cold_res: Option<f64>,
    pub light_res: Option<f64>,
    pub poison_res: Option<f64>,
    pub above_low_gold: bool,
    pub above_gold_threshold: bool,
}

/// Numeric threshold of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionField {
    Level,
    FireRes,
    ColdRes,
    LightRes,
    PoisonRes,
}

pub const CONDITION_FIELDS: [ConditionField; 5] = [
    ConditionField::Level,
    ConditionField::FireRes,
    ConditionField::ColdRes,
    ConditionField::LightRes,
    ConditionField::PoisonRes,
];

impl ConditionField {
    pub const fn key(self) -> &'static str {
        match self {
            ConditionField::Level => "level",
            ConditionField::FireRes => "fireRes",
            ConditionField::ColdRes => "coldRes",
            ConditionField::LightRes => "lightRes",
            ConditionField::PoisonRes => "poisonRes",
        }
    }

    pub const fn edit_label(self) -> &'static str {
        match self {
            ConditionField::Level => "Required Level",
            ConditionField::FireRes => "Fire Res",
            ConditionField::ColdRes => "Cold Res",
            ConditionField::LightRes => "Lightning Res",
            ConditionField::PoisonRes => "Poison Res",
        }
    }
}

/// Boolean requirement of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionFlag {
    AboveLowGold,
    AboveGoldThreshold,
}

pub const CONDITION_FLAGS: [ConditionFlag; 2] =
    [ConditionFlag::AboveLowGold, ConditionFlag::AboveGoldThreshold];

impl ConditionFlag {
    pub const fn key(self) -> &'static str {
        match self {
            ConditionFlag::AboveLowGold => "aboveLowGold",
            ConditionFlag::AboveGoldThreshold => "aboveGoldThreshold",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ConditionFlag::AboveLowGold => "Above low gold",
            ConditionFlag::AboveGoldThreshold => "Above gold threshold",
        }
    }
}

impl ConditionEntry {
    pub fn value(&self, field: ConditionField) -> Option<f64> {
        match field {
            ConditionField::Level => self.level,
            ConditionField::FireRes => self.fire_res,
            ConditionField::ColdRes => self.cold_res,
            ConditionField::LightRes => self.light_res,
            ConditionField::PoisonRes => self.poison_res,
        }
    }

    pub fn set_value(&mut self, field: ConditionField, value: Option<f64>) {
        let slot = match field {
            ConditionField::Level => &mut self.level,
            ConditionField::FireRes => &mut self.fire_res,
            ConditionField::ColdRes => &mut self.cold_res,
            ConditionField::LightRes => &mut self.light_res,
            ConditionField::PoisonRes => &mut self.poison_res,
        };
        *slot = finite(value);
    }

    pub fn flag(&self, flag: ConditionFlag) -> bool {
        match flag {
            ConditionFlag::AboveLowGold => self.above_low_gold,
            ConditionFlag::AboveGoldThreshold => self.above_gold_threshold,
        }
    }

    pub fn set_flag(&mut self, flag: ConditionFlag, enabled: bool) {
        match flag {
            ConditionFlag::AboveLowGold => self.above_low_gold = enabled,
            ConditionFlag::AboveGoldThreshold => self.above_gold_threshold = enabled,
        }
    }

    /// One-line summary, e.g. `Level ≥ 30 • Fire 75+ • Above low gold`
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(level) = self.level {
            parts.push(format!("Level ≥ {}", level));
        }
        let resists = [
            (self.fire_res, "Fire"),
            (self.cold_res, "Cold"),
            (self.light_res, "Lightning"),
            (self.poison_res, "Poison"),
        ];
        for (value, label) in resists {
            if let Some(value) = value {
                parts.push(format!("{} {}+", label, value));
            }
        }
        if self.above_low_gold {
            parts.push(ConditionFlag::AboveLowGold.label().to_string());
        }
        if self.above_gold_threshold {
            parts.push(ConditionFlag::AboveGoldThreshold.label().to_string());
        }
        if parts.is_empty() {
            "No requirements".to_string()
        } else {
            parts.join(SUMMARY_SEPARATOR)
        }
    }
}

/// Summary for a condition row that may be switched off
pub fn condition_summary(condition: Option<&ConditionEntry>) -> String {
    condition.map_or_else(|| "Disabled".to_string(), ConditionEntry::summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_summary() {
        let mut entry = ConfigOverrideEntry::default();
        assert_eq!(entry.summary(), "No adjustments");
        assert!(entry.is_empty());

        entry.level = Some(40.0);
        entry.health_settings.set(HealthField::ChickenAt, Some(25.0));
        entry.health_settings.set(HealthField::HealingPotionAt, Some(60.0));
        assert_eq!(entry.summary(), "Level ≥ 40 • Heal @ 60% • Chicken @ 25%");
        assert!(!entry.is_empty());
    }

    #[test]
    fn test_health_settings_drop_non_finite() {
        let mut settings = HealthSettings::default();
        settings.set(HealthField::ChickenAt, Some(f64::NAN));
        settings.set(HealthField::TownChickenAt, Some(f64::NEG_INFINITY));
        assert!(settings.is_empty());
        settings.set(HealthField::ChickenAt, Some(30.0));
        assert_eq!(settings.get(HealthField::ChickenAt), Some(30.0));
    }

    #[test]
    fn test_condition_summary() {
        assert_eq!(condition_summary(None), "Disabled");

        let mut condition = ConditionEntry::default();
        assert_eq!(condition_summary(Some(&condition)), "No requirements");

        condition.level = Some(30.0);
        condition.fire_res = Some(75.0);
        condition.light_res = Some(40.5);
        condition.above_gold_threshold = true;
        assert_eq!(
            condition.summary(),
            "Level ≥ 30 • Fire 75+ • Lightning 40.5+ • Above gold threshold"
        );
    }

    #[test]
    fn test_condition_field_accessors() {
        let mut condition = ConditionEntry::default();
        for (i, field) in CONDITION_FIELDS.into_iter().enumerate() {
            condition.set_value(field, Some(i as f64));
        }
        assert_eq!(condition.level, Some(0.0));
        assert_eq!(condition.poison_res, Some(4.0));
        assert_eq!(condition.value(ConditionField::ColdRes), Some(2.0));

        condition.set_value(ConditionField::FireRes, Some(f64::NAN));
        condition.set_value(ConditionField::ColdRes, Some(f64::INFINITY));
        assert_eq!(condition.fire_res, None);
        assert_eq!(condition.cold_res, None);

        condition.set_flag(ConditionFlag::AboveLowGold, true);
        assert!(condition.flag(ConditionFlag::AboveLowGold));
        assert!(!condition.flag(ConditionFlag::AboveGoldThreshold));
    }

    #[test]
    fn test_run_flags() {
        let mut entry = RunEntry::new("pit");
        assert!(entry.has_run());
        entry.set_flag(RunFlag::ExitGame, true);
        assert!(entry.exit_game);
        assert!(entry.flag(RunFlag::ExitGame));
        assert!(!entry.flag(RunFlag::LowGoldRun));
        assert!(!RunEntry::default().has_run());
    }

    #[test]
    fn test_run_flag_keys_match_wire_fields() {
        use crate::coerce::run;
        let wire = [
            run::LOW_GOLD_RUN,
            run::SKIP_TOWN_CHORES,
            run::EXIT_GAME,
            run::STOP_IF_CHECK_FAILS,
        ];
        for (flag, field) in RUN_FLAGS.into_iter().zip(wire) {
            assert_eq!(flag.key(), field.name);
        }
    }
}
