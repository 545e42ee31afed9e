//! Which rows currently have their inline editor open
//!
//! Rows are rebuilt on every render, so this lives outside the model in
//! side tables keyed by entry identity (list rows) or by section (condition
//! rows).

use ahash::AHashSet;

use crate::catalog::{ConditionKey, Tier};
use crate::identity::EntryId;

#[derive(Debug, Clone, Default)]
pub struct EditingState {
    configs: AHashSet<(Tier, EntryId)>,
    runs: AHashSet<(Tier, EntryId)>,
    conditions: AHashSet<(Tier, ConditionKey)>,
}

#[inline]
fn toggle<K: Eq + std::hash::Hash>(set: &mut AHashSet<K>, key: K, enabled: bool) {
    if enabled {
        set.insert(key);
    } else {
        set.remove(&key);
    }
}

impl EditingState {
    pub fn is_config_editing(&self, tier: Tier, uid: EntryId) -> bool {
        self.configs.contains(&(tier, uid))
    }

    pub fn set_config_editing(&mut self, tier: Tier, uid: EntryId, enabled: bool) {
        toggle(&mut self.configs, (tier, uid), enabled);
    }

    pub fn is_run_editing(&self, tier: Tier, uid: EntryId) -> bool {
        self.runs.contains(&(tier, uid))
    }

    pub fn set_run_editing(&mut self, tier: Tier, uid: EntryId, enabled: bool) {
        toggle(&mut self.runs, (tier, uid), enabled);
    }

    pub fn is_condition_editing(&self, tier: Tier, key: ConditionKey) -> bool {
        self.conditions.contains(&(tier, key))
    }

    pub fn set_condition_editing(&mut self, tier: Tier, key: ConditionKey, enabled: bool) {
        toggle(&mut self.conditions, (tier, key), enabled);
    }

    /// Close every open editor
    pub fn clear(&mut self) {
        self.configs.clear();
        self.runs.clear();
        self.conditions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Tracked;

    #[test]
    fn test_editing_keyed_by_tier_and_uid() {
        let mut state = EditingState::default();
        let uid = Tracked::identified(()).ensure_uid();
        state.set_config_editing(Tier::Normal, uid, true);
        assert!(state.is_config_editing(Tier::Normal, uid));
        assert!(!state.is_config_editing(Tier::Hell, uid));
        assert!(!state.is_run_editing(Tier::Normal, uid));
        state.set_config_editing(Tier::Normal, uid, false);
        assert!(!state.is_config_editing(Tier::Normal, uid));
    }

    #[test]
    fn test_condition_editing() {
        let mut state = EditingState::default();
        state.set_condition_editing(Tier::Nightmare, ConditionKey::Stay, true);
        assert!(state.is_condition_editing(Tier::Nightmare, ConditionKey::Stay));
        assert!(!state.is_condition_editing(Tier::Nightmare, ConditionKey::Next));
        state.clear();
        assert!(!state.is_condition_editing(Tier::Nightmare, ConditionKey::Stay));
    }
}
