//! Per-difficulty settings and the three-tier sequence model

use crate::catalog::{ConditionKey, RunSection, Tier, TIERS};
use crate::identity::Tracked;
use crate::model::{ConditionEntry, ConfigOverrideEntry, RunEntry};
use std::ops::{Index, IndexMut};

/// Run list with editor identities
pub type RunList = Vec<Tracked<RunEntry>>;

/// Config override list with editor identities
pub type ConfigList = Vec<Tracked<ConfigOverrideEntry>>;

/// Everything configured for one difficulty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DifficultySettings {
    pub before_quests: RunList,
    pub quests: RunList,
    pub after_quests: RunList,
    pub config_settings: ConfigList,
    /// Gate for advancing past this difficulty
    pub next_difficulty_conditions: Option<ConditionEntry>,
    /// Gate for staying on this difficulty
    pub stay_difficulty_conditions: Option<ConditionEntry>,
}

impl DifficultySettings {
    pub fn runs(&self, section: RunSection) -> &RunList {
        match section {
            RunSection::BeforeQuests => &self.before_quests,
            RunSection::Quests => &self.quests,
            RunSection::AfterQuests => &self.after_quests,
        }
    }

    pub fn runs_mut(&mut self, section: RunSection) -> &mut RunList {
        match section {
            RunSection::BeforeQuests => &mut self.before_quests,
            RunSection::Quests => &mut self.quests,
            RunSection::AfterQuests => &mut self.after_quests,
        }
    }

    pub fn condition(&self, key: ConditionKey) -> Option<&ConditionEntry> {
        match key {
            ConditionKey::Next => self.next_difficulty_conditions.as_ref(),
            ConditionKey::Stay => self.stay_difficulty_conditions.as_ref(),
        }
    }

    pub fn condition_slot(&mut self, key: ConditionKey) -> &mut Option<ConditionEntry> {
        match key {
            ConditionKey::Next => &mut self.next_difficulty_conditions,
            ConditionKey::Stay => &mut self.stay_difficulty_conditions,
        }
    }
}

/// The full three-difficulty sequence being edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceModel {
    tiers: [DifficultySettings; 3],
}

impl SequenceModel {
    pub fn from_tiers(tiers: [DifficultySettings; 3]) -> Self {
        Self { tiers }
    }

    /// Tiers paired with their settings, lowest first
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &DifficultySettings)> {
        TIERS.into_iter().zip(self.tiers.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Tier, &mut DifficultySettings)> {
        TIERS.into_iter().zip(self.tiers.iter_mut())
    }

    /// Whether both sides of every boundary agree
    pub fn boundaries_agree(&self) -> bool {
        crate::catalog::BOUNDARIES.iter().all(|b| {
            self[b.lower].next_difficulty_conditions == self[b.upper].stay_difficulty_conditions
        })
    }
}

impl Index<Tier> for SequenceModel {
    type Output = DifficultySettings;

    fn index(&self, tier: Tier) -> &DifficultySettings {
        &self.tiers[tier.index()]
    }
}

impl IndexMut<Tier> for SequenceModel {
    fn index_mut(&mut self, tier: Tier) -> &mut DifficultySettings {
        &mut self.tiers[tier.index()]
    }
}

/// Condition with every threshold unset and both flags off
pub fn create_empty_conditions() -> ConditionEntry {
    ConditionEntry::default()
}

/// Blank run entry with its identity already assigned
pub fn create_empty_run_entry() -> Tracked<RunEntry> {
    Tracked::identified(RunEntry::default())
}

/// Blank config override with its identity already assigned
pub fn create_empty_config_entry() -> Tracked<ConfigOverrideEntry> {
    Tracked::identified(ConfigOverrideEntry::default())
}

/// Skeleton for a brand-new sequence.
///
/// Seeds `normal.next`, `nightmare.next` and `hell.stay` as present but
/// empty and leaves `nightmare.stay` absent.
pub fn create_empty_model() -> SequenceModel {
    let mut model = SequenceModel::default();
    model[Tier::Normal].next_difficulty_conditions = Some(create_empty_conditions());
    model[Tier::Nightmare].next_difficulty_conditions = Some(create_empty_conditions());
    model[Tier::Nightmare].stay_difficulty_conditions = None;
    model[Tier::Hell].stay_difficulty_conditions = Some(create_empty_conditions());
    model
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_model_skeleton() {
        let model = create_empty_model();
        assert!(model[Tier::Normal].next_difficulty_conditions.is_some());
        assert!(model[Tier::Normal].stay_difficulty_conditions.is_none());
        assert!(model[Tier::Nightmare].stay_difficulty_conditions.is_none());
        assert!(model[Tier::Nightmare].next_difficulty_conditions.is_some());
        assert!(model[Tier::Hell].stay_difficulty_conditions.is_some());
        assert!(model[Tier::Hell].next_difficulty_conditions.is_none());
        for (_, settings) in model.iter() {
            assert!(settings.quests.is_empty());
            assert!(settings.config_settings.is_empty());
        }
    }

    #[test]
    fn test_empty_model_boundary_state() {
        let model = create_empty_model();
        // normal.next is seeded but nightmare.stay is not
        assert!(!model.boundaries_agree());
        assert_eq!(
            model[Tier::Nightmare].next_difficulty_conditions,
            model[Tier::Hell].stay_difficulty_conditions
        );
    }

    #[test]
    fn test_empty_entries_are_identified() {
        let a = create_empty_run_entry();
        let b = create_empty_config_entry();
        assert!(a.uid().is_some());
        assert!(b.uid().is_some());
        assert_eq!(a.run, "");
    }

    #[test]
    fn test_section_accessors() {
        let mut settings = DifficultySettings::default();
        settings
            .runs_mut(RunSection::AfterQuests)
            .push(Tracked::new(RunEntry::new("baal")));
        assert_eq!(settings.after_quests.len(), 1);
        assert!(settings.runs(RunSection::Quests).is_empty());

        *settings.condition_slot(ConditionKey::Stay) = Some(create_empty_conditions());
        assert!(settings.condition(ConditionKey::Stay).is_some());
        assert!(settings.condition(ConditionKey::Next).is_none());
    }
}
