//! Strict model -> minimal wire payload
//!
//! Only populated fields are written. Run flags appear only when `true`,
//! condition flags always appear, and entries that would carry nothing are
//! dropped from their list.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::catalog::Tier;
use crate::coerce::{number_value, serialize_number};
use crate::error::Result;
use crate::identity::Tracked;
use crate::model::{
    ConditionEntry, ConfigOverrideEntry, DifficultySettings, HealthSettings, RunEntry,
    SequenceModel,
};

#[inline]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Saved form of a run entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRunEntry {
    pub run: String,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_number")]
    pub min_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_number")]
    pub max_level: Option<f64>,
    #[serde(skip_serializing_if = "is_false")]
    pub low_gold_run: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub skip_town_chores: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub exit_game: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub stop_if_check_fails: bool,
}

/// Saved health settings: only defined fields, in display order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireHealthSettings(pub HealthSettings);

impl Serialize for WireHealthSettings {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (field, value) in self.0.iter_defined() {
            map.serialize_entry(field.key(), &number_value(value))?;
        }
        map.end()
    }
}

/// Saved form of a config override
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireConfigEntry {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_number")]
    pub level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_settings: Option<WireHealthSettings>,
}

/// Saved form of a difficulty condition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireConditionEntry {
    pub above_low_gold: bool,
    pub above_gold_threshold: bool,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_number")]
    pub level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_number")]
    pub fire_res: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_number")]
    pub cold_res: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_number")]
    pub light_res: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_number")]
    pub poison_res: Option<f64>,
}

/// Saved form of one difficulty
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDifficultySettings {
    pub before_quests: Vec<WireRunEntry>,
    pub quests: Vec<WireRunEntry>,
    pub after_quests: Vec<WireRunEntry>,
    pub config_settings: Vec<WireConfigEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_difficulty_conditions: Option<WireConditionEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stay_difficulty_conditions: Option<WireConditionEntry>,
}

/// Snapshot handed to the save operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequencePayload {
    pub normal: WireDifficultySettings,
    pub nightmare: WireDifficultySettings,
    pub hell: WireDifficultySettings,
}

impl SequencePayload {
    pub fn tier(&self, tier: Tier) -> &WireDifficultySettings {
        match tier {
            Tier::Normal => &self.normal,
            Tier::Nightmare => &self.nightmare,
            Tier::Hell => &self.hell,
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Serialize the whole model
pub fn serialize(model: &SequenceModel) -> SequencePayload {
    SequencePayload {
        normal: serialize_difficulty(&model[Tier::Normal]),
        nightmare: serialize_difficulty(&model[Tier::Nightmare]),
        hell: serialize_difficulty(&model[Tier::Hell]),
    }
}

/// Serialize one difficulty; absent conditions are left out entirely
pub fn serialize_difficulty(settings: &DifficultySettings) -> WireDifficultySettings {
    WireDifficultySettings {
        before_quests: serialize_run_section(&settings.before_quests),
        quests: serialize_run_section(&settings.quests),
        after_quests: serialize_run_section(&settings.after_quests),
        config_settings: settings
            .config_settings
            .iter()
            .filter_map(|entry| serialize_config_entry(entry))
            .collect(),
        next_difficulty_conditions: settings
            .next_difficulty_conditions
            .as_ref()
            .map(serialize_condition),
        stay_difficulty_conditions: settings
            .stay_difficulty_conditions
            .as_ref()
            .map(serialize_condition),
    }
}

fn serialize_run_section(list: &[Tracked<RunEntry>]) -> Vec<WireRunEntry> {
    list.iter()
        .filter_map(|entry| serialize_run_entry(entry))
        .collect()
}

/// Serialize a run entry; an entry without a run name yields nothing
pub fn serialize_run_entry(entry: &RunEntry) -> Option<WireRunEntry> {
    if !entry.has_run() {
        return None;
    }
    Some(WireRunEntry {
        run: entry.run.clone(),
        min_level: entry.min_level,
        max_level: entry.max_level,
        low_gold_run: entry.low_gold_run,
        skip_town_chores: entry.skip_town_chores,
        exit_game: entry.exit_game,
        stop_if_check_fails: entry.stop_if_check_fails,
    })
}

/// Serialize a config override; an entry with no level and no health
/// values yields nothing
pub fn serialize_config_entry(entry: &ConfigOverrideEntry) -> Option<WireConfigEntry> {
    if entry.is_empty() {
        return None;
    }
    let health = &entry.health_settings;
    Some(WireConfigEntry {
        level: entry.level,
        health_settings: (!health.is_empty()).then_some(WireHealthSettings(*health)),
    })
}

/// Serialize a condition; both flags are always written
pub fn serialize_condition(condition: &ConditionEntry) -> WireConditionEntry {
    WireConditionEntry {
        above_low_gold: condition.above_low_gold,
        above_gold_threshold: condition.above_gold_threshold,
        level: condition.level,
        fire_res: condition.fire_res,
        cold_res: condition.cold_res,
        light_res: condition.light_res,
        poison_res: condition.poison_res,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::HealthField;
    use serde_json::json;

    fn to_json<T: Serialize>(value: &T) -> Value {
        serde_json::to_value(value).unwrap()
    }

    #[test]
    fn test_run_entry_minimal() {
        let entry = RunEntry::new("pit");
        assert_eq!(to_json(&serialize_run_entry(&entry).unwrap()), json!({"run": "pit"}));

        let entry = RunEntry {
            run: "cows".to_string(),
            min_level: Some(70.0),
            exit_game: true,
            ..Default::default()
        };
        assert_eq!(
            to_json(&serialize_run_entry(&entry).unwrap()),
            json!({"run": "cows", "minLevel": 70, "exitGame": true})
        );
    }

    #[test]
    fn test_run_entry_without_name_dropped() {
        assert!(serialize_run_entry(&RunEntry::default()).is_none());

        let mut settings = DifficultySettings::default();
        settings.quests.push(Tracked::new(RunEntry::new("den")));
        settings.quests.push(Tracked::new(RunEntry::default()));
        settings.quests.push(Tracked::new(RunEntry::new("andariel")));
        let wire = serialize_difficulty(&settings);
        let names: Vec<_> = wire.quests.iter().map(|e| e.run.as_str()).collect();
        assert_eq!(names, vec!["den", "andariel"]);
    }

    #[test]
    fn test_empty_config_entry_dropped() {
        let mut settings = DifficultySettings::default();
        settings
            .config_settings
            .push(Tracked::identified(ConfigOverrideEntry::default()));
        assert_eq!(settings.config_settings.len(), 1);
        assert!(serialize_difficulty(&settings).config_settings.is_empty());
    }

    #[test]
    fn test_config_entry_fields() {
        let mut entry = ConfigOverrideEntry::default();
        entry.health_settings.set(HealthField::ManaPotionAt, Some(20.0));
        assert_eq!(
            to_json(&serialize_config_entry(&entry).unwrap()),
            json!({"healthSettings": {"manaPotionAt": 20}})
        );

        let entry = ConfigOverrideEntry {
            level: Some(12.5),
            ..Default::default()
        };
        assert_eq!(
            to_json(&serialize_config_entry(&entry).unwrap()),
            json!({"level": 12.5})
        );
    }

    #[test]
    fn test_condition_flags_explicit() {
        let wire = serialize_condition(&ConditionEntry::default());
        assert_eq!(
            to_json(&wire),
            json!({"aboveLowGold": false, "aboveGoldThreshold": false})
        );

        let condition = ConditionEntry {
            level: Some(40.0),
            poison_res: Some(30.0),
            above_low_gold: true,
            ..Default::default()
        };
        assert_eq!(
            to_json(&serialize_condition(&condition)),
            json!({"aboveLowGold": true, "aboveGoldThreshold": false, "level": 40, "poisonRes": 30})
        );
    }

    #[test]
    fn test_absent_conditions_are_key_absent() {
        let value = to_json(&serialize_difficulty(&DifficultySettings::default()));
        assert_eq!(
            value,
            json!({"beforeQuests": [], "quests": [], "afterQuests": [], "configSettings": []})
        );
    }

    #[test]
    fn test_payload_keys() {
        let payload = serialize(&SequenceModel::default());
        let value = payload.to_value().unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        for tier in crate::catalog::TIERS {
            assert!(value.get(tier.as_str()).is_some());
            assert!(payload.tier(tier).quests.is_empty());
        }
    }
}
