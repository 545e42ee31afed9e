//! Declarative wire field table with legacy aliases
//!
//! Every field the adapter reads has exactly one canonical name, which is the
//! only name ever written back out. Older payloads used capitalized names;
//! those are listed as aliases and tried after the canonical name.

use serde_json::{Map, Value};

/// A wire field: canonical name plus legacy aliases in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireField {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl WireField {
    pub const fn new(name: &'static str) -> Self {
        Self { name, aliases: &[] }
    }

    pub const fn with_aliases(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }

    /// First non-null value among the canonical name and its aliases
    pub fn lookup<'a>(&self, obj: &'a Map<String, Value>) -> Option<&'a Value> {
        std::iter::once(self.name)
            .chain(self.aliases.iter().copied())
            .filter_map(|name| obj.get(name))
            .find(|value| !value.is_null())
    }
}

/// Run entry fields
pub mod run {
    use super::WireField;

    pub const RUN: WireField = WireField::new("run");
    pub const MIN_LEVEL: WireField = WireField::with_aliases("minLevel", &["MinLevel"]);
    pub const MAX_LEVEL: WireField = WireField::with_aliases("maxLevel", &["MaxLevel"]);
    pub const LOW_GOLD_RUN: WireField = WireField::with_aliases("lowGoldRun", &["LowGoldRun"]);
    pub const SKIP_TOWN_CHORES: WireField =
        WireField::with_aliases("skipTownChores", &["SkipTownChores"]);
    pub const EXIT_GAME: WireField = WireField::with_aliases("exitGame", &["ExitGame"]);
    pub const STOP_IF_CHECK_FAILS: WireField =
        WireField::with_aliases("stopIfCheckFails", &["StopIfCheckFails"]);
}

/// Config override fields
pub mod config {
    use super::WireField;

    pub const LEVEL: WireField = WireField::with_aliases("level", &["Level"]);
    pub const HEALTH_SETTINGS: WireField = WireField::new("healthSettings");
}

/// Difficulty condition fields
pub mod condition {
    use super::WireField;

    pub const LEVEL: WireField = WireField::new("level");
    pub const FIRE_RES: WireField = WireField::new("fireRes");
    pub const COLD_RES: WireField = WireField::new("coldRes");
    pub const LIGHT_RES: WireField = WireField::new("lightRes");
    pub const POISON_RES: WireField = WireField::new("poisonRes");
    pub const ABOVE_LOW_GOLD: WireField = WireField::new("aboveLowGold");
    pub const ABOVE_GOLD_THRESHOLD: WireField = WireField::new("aboveGoldThreshold");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_canonical_name_wins() {
        let raw = obj(json!({"minLevel": 10, "MinLevel": 20}));
        assert_eq!(run::MIN_LEVEL.lookup(&raw), Some(&json!(10)));
    }

    #[test]
    fn test_alias_used_when_canonical_missing_or_null() {
        let raw = obj(json!({"MinLevel": 20}));
        assert_eq!(run::MIN_LEVEL.lookup(&raw), Some(&json!(20)));

        let raw = obj(json!({"minLevel": null, "MinLevel": 20}));
        assert_eq!(run::MIN_LEVEL.lookup(&raw), Some(&json!(20)));
    }

    #[test]
    fn test_false_is_not_skipped() {
        let raw = obj(json!({"lowGoldRun": false, "LowGoldRun": true}));
        assert_eq!(run::LOW_GOLD_RUN.lookup(&raw), Some(&json!(false)));
    }

    #[test]
    fn test_missing_field() {
        let raw = obj(json!({"run": "pit"}));
        assert_eq!(run::EXIT_GAME.lookup(&raw), None);
        assert_eq!(condition::FIRE_RES.lookup(&raw), None);
    }
}
