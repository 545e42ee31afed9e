//! Raw payload -> strict model
//!
//! Every step here is total: wrong shapes read as absent, unparseable
//! numbers read as `None`, and run entries without a name are dropped.

use serde_json::{Map, Value};

use crate::catalog::{Tier, HEALTH_FIELDS, TIERS};
use crate::coerce::{
    self, coerce_bool, is_truthy, normalize_run_numeric_value, parse_optional_number, WireField,
};
use crate::identity::Tracked;
use crate::model::{
    ConditionEntry, ConfigList, ConfigOverrideEntry, DifficultySettings, RunEntry, RunList,
    SequenceModel,
};

/// Empty map used when a raw value is not an object
static EMPTY: once_cell::sync::Lazy<Map<String, Value>> = once_cell::sync::Lazy::new(Map::new);

#[inline]
fn as_object(value: Option<&Value>) -> &Map<String, Value> {
    value.and_then(Value::as_object).unwrap_or(&*EMPTY)
}

#[inline]
fn number(obj: &Map<String, Value>, field: &WireField) -> Option<f64> {
    field.lookup(obj).and_then(parse_optional_number)
}

#[inline]
fn run_level(obj: &Map<String, Value>, field: &WireField) -> Option<f64> {
    normalize_run_numeric_value(number(obj, field))
}

/// Build the strict model from a raw payload keyed by difficulty name.
///
/// Missing difficulties come out empty. The result has been normalized and
/// every list entry carries an identity.
pub fn hydrate(raw: &Value) -> SequenceModel {
    let source = raw.as_object();
    let mut model = SequenceModel::default();
    for tier in TIERS {
        let tier_raw = source.and_then(|obj| obj.get(tier.as_str()));
        model[tier] = hydrate_difficulty(tier, tier_raw);
    }
    super::normalize(&mut model);
    model
}

/// Build one difficulty's settings from its raw sub-object
pub fn hydrate_difficulty(tier: Tier, raw: Option<&Value>) -> DifficultySettings {
    let source = as_object(raw);
    let settings = DifficultySettings {
        before_quests: hydrate_run_list(source.get("beforeQuests")),
        quests: hydrate_run_list(source.get("quests")),
        after_quests: hydrate_run_list(source.get("afterQuests")),
        config_settings: hydrate_config_list(source.get("configSettings")),
        next_difficulty_conditions: hydrate_condition(source.get("nextDifficultyConditions")),
        stay_difficulty_conditions: hydrate_condition(source.get("stayDifficultyConditions")),
    };
    log::trace!(
        "hydrated {}: {} before, {} quests, {} after, {} config overrides",
        tier,
        settings.before_quests.len(),
        settings.quests.len(),
        settings.after_quests.len(),
        settings.config_settings.len()
    );
    settings
}

/// Hydrate a run list, dropping entries without a run name
pub fn hydrate_run_list(raw: Option<&Value>) -> RunList {
    let Some(items) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };
    let list: RunList = items
        .iter()
        .filter_map(hydrate_run_entry)
        .filter(RunEntry::has_run)
        .map(Tracked::new)
        .collect();
    if list.len() < items.len() {
        log::debug!("dropped {} run entries without a run name", items.len() - list.len());
    }
    list
}

/// Hydrate one run entry, accepting legacy capitalized field names.
///
/// Unknown keys, including the retired `parameters` field, are ignored.
pub fn hydrate_run_entry(raw: &Value) -> Option<RunEntry> {
    use coerce::run::*;

    if !is_truthy(raw) {
        return None;
    }
    let obj = as_object(Some(raw));
    Some(RunEntry {
        run: RUN
            .lookup(obj)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        min_level: run_level(obj, &MIN_LEVEL),
        max_level: run_level(obj, &MAX_LEVEL),
        low_gold_run: coerce_bool(LOW_GOLD_RUN.lookup(obj)),
        skip_town_chores: coerce_bool(SKIP_TOWN_CHORES.lookup(obj)),
        exit_game: coerce_bool(EXIT_GAME.lookup(obj)),
        stop_if_check_fails: coerce_bool(STOP_IF_CHECK_FAILS.lookup(obj)),
    })
}

/// Hydrate the config override list; falsy items are skipped
pub fn hydrate_config_list(raw: Option<&Value>) -> ConfigList {
    raw.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(hydrate_config_entry)
                .map(Tracked::new)
                .collect()
        })
        .unwrap_or_default()
}

/// Hydrate one config override, keeping only known health fields that parse
pub fn hydrate_config_entry(raw: &Value) -> Option<ConfigOverrideEntry> {
    use coerce::config::*;

    if !is_truthy(raw) {
        return None;
    }
    let obj = as_object(Some(raw));
    let mut entry = ConfigOverrideEntry {
        level: number(obj, &LEVEL),
        ..Default::default()
    };
    let health = as_object(HEALTH_SETTINGS.lookup(obj));
    for def in HEALTH_FIELDS.iter() {
        if let Some(value) = health.get(def.key).and_then(parse_optional_number) {
            entry.health_settings.set(def.field, Some(value));
        }
    }
    Some(entry)
}

/// Hydrate a difficulty condition; a falsy raw value means "no gate"
pub fn hydrate_condition(raw: Option<&Value>) -> Option<ConditionEntry> {
    use coerce::condition::*;

    let raw = raw.filter(|value| is_truthy(value))?;
    let obj = as_object(Some(raw));
    Some(ConditionEntry {
        level: number(obj, &LEVEL),
        fire_res: number(obj, &FIRE_RES),
        cold_res: number(obj, &COLD_RES),
        light_res: number(obj, &LIGHT_RES),
        poison_res: number(obj, &POISON_RES),
        above_low_gold: coerce_bool(ABOVE_LOW_GOLD.lookup(obj)),
        above_gold_threshold: coerce_bool(ABOVE_GOLD_THRESHOLD.lookup(obj)),
    })
}
