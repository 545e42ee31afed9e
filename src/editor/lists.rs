//! Ordered list editing for config overrides and run lists
//!
//! Rows address entries by identity, never by index: the list may have been
//! reordered since a row was built, so positions are resolved at the moment
//! of each edit.

use crate::catalog::{RunSection, Tier};
use crate::coerce::{finite, normalize_run_numeric_value};
use crate::error::{Result, SequenceError};
use crate::identity::{position_of, EntryId, Tracked};
use crate::model::{
    create_empty_config_entry, create_empty_run_entry, ConfigOverrideEntry, RunEntry, RunFlag,
};

use super::{EditorView, SequenceEditor};

const REMOVE_CONFIG_PROMPT: &str = "Remove this config block?";
const REMOVE_RUN_PROMPT: &str = "Remove this run?";

// ============================================================================
// Reordering
// ============================================================================

/// Rearranges a live list in place, e.g. at the end of a drag gesture
pub trait ReorderDriver<T> {
    /// Reorder `list`; return whether anything moved
    fn reorder(&mut self, list: &mut [Tracked<T>]) -> bool;
}

/// Move one entry to a new position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTo {
    pub uid: EntryId,
    pub index: usize,
}

impl<T> ReorderDriver<T> for MoveTo {
    fn reorder(&mut self, list: &mut [Tracked<T>]) -> bool {
        let Some(from) = position_of(list, self.uid) else {
            return false;
        };
        let to = self.index.min(list.len() - 1);
        if from < to {
            list[from..=to].rotate_left(1);
        } else if to < from {
            list[to..=from].rotate_right(1);
        }
        from != to
    }
}

fn find_mut<T>(list: &mut [Tracked<T>], uid: EntryId) -> Result<&mut Tracked<T>> {
    list.iter_mut()
        .find(|entry| entry.uid() == Some(uid))
        .ok_or(SequenceError::EntryNotFound(uid))
}

/// Which level bound of a run entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelBound {
    Min,
    Max,
}

// ============================================================================
// Config overrides
// ============================================================================

impl SequenceEditor {
    /// Append an empty override, open its editor and re-render
    pub fn add_config(&mut self, tier: Tier, view: &mut dyn EditorView) -> EntryId {
        let entry = create_empty_config_entry();
        let uid = entry.ensure_uid();
        self.model[tier].config_settings.push(entry);
        self.editing.set_config_editing(tier, uid, true);
        log::debug!("added config override {} to {}", uid, tier);
        view.render(self, tier);
        view.mark_dirty();
        uid
    }

    /// Remove an override after the user confirms.
    ///
    /// Returns `Ok(false)` if the user declined.
    pub fn remove_config(
        &mut self,
        tier: Tier,
        uid: EntryId,
        view: &mut dyn EditorView,
    ) -> Result<bool> {
        if position_of(&self.model[tier].config_settings, uid).is_none() {
            return Err(SequenceError::EntryNotFound(uid));
        }
        if !view.confirm(REMOVE_CONFIG_PROMPT) {
            return Ok(false);
        }
        self.editing.set_config_editing(tier, uid, false);
        let list = &mut self.model[tier].config_settings;
        if let Some(index) = position_of(list, uid) {
            list.remove(index);
        }
        log::debug!("removed config override {} from {}", uid, tier);
        view.render(self, tier);
        view.mark_dirty();
        Ok(true)
    }

    /// Let `driver` reorder the live override list, then re-render
    pub fn reorder_configs(
        &mut self,
        tier: Tier,
        driver: &mut dyn ReorderDriver<ConfigOverrideEntry>,
        view: &mut dyn EditorView,
    ) -> bool {
        let moved = driver.reorder(&mut self.model[tier].config_settings);
        if moved {
            log::debug!("reordered config overrides of {}", tier);
            view.render(self, tier);
            view.mark_dirty();
        }
        moved
    }

    /// Apply `edit` to one override and mark the session dirty
    pub fn update_config<F>(
        &mut self,
        tier: Tier,
        uid: EntryId,
        view: &mut dyn EditorView,
        edit: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut ConfigOverrideEntry),
    {
        let entry = find_mut(&mut self.model[tier].config_settings, uid)?;
        edit(entry.entry_mut());
        view.mark_dirty();
        Ok(())
    }

    pub fn set_config_level(
        &mut self,
        tier: Tier,
        uid: EntryId,
        level: Option<f64>,
        view: &mut dyn EditorView,
    ) -> Result<()> {
        let level = finite(level);
        self.update_config(tier, uid, view, |entry| entry.level = level)
    }

    pub fn set_health_value(
        &mut self,
        tier: Tier,
        uid: EntryId,
        field: crate::catalog::HealthField,
        value: Option<f64>,
        view: &mut dyn EditorView,
    ) -> Result<()> {
        self.update_config(tier, uid, view, |entry| {
            entry.health_settings.set(field, value)
        })
    }

    pub fn set_config_editing(
        &mut self,
        tier: Tier,
        uid: EntryId,
        enabled: bool,
        view: &mut dyn EditorView,
    ) {
        self.editing.set_config_editing(tier, uid, enabled);
        view.render(self, tier);
    }

    /// Summary line of an override row
    pub fn config_summary(&self, tier: Tier, uid: EntryId) -> Result<String> {
        self.model[tier]
            .config_settings
            .iter()
            .find(|entry| entry.uid() == Some(uid))
            .map(|entry| entry.summary())
            .ok_or(SequenceError::EntryNotFound(uid))
    }

    // ========================================================================
    // Run lists
    // ========================================================================

    /// Append an empty run to a section, open its editor and re-render.
    ///
    /// The entry is not saved until it is given a run name.
    pub fn add_run(
        &mut self,
        tier: Tier,
        section: RunSection,
        view: &mut dyn EditorView,
    ) -> EntryId {
        let entry = create_empty_run_entry();
        let uid = entry.ensure_uid();
        self.model[tier].runs_mut(section).push(entry);
        self.editing.set_run_editing(tier, uid, true);
        log::debug!("added run {} to {}.{}", uid, tier, section);
        view.render(self, tier);
        view.mark_dirty();
        uid
    }

    /// Remove a run after the user confirms
    pub fn remove_run(
        &mut self,
        tier: Tier,
        section: RunSection,
        uid: EntryId,
        view: &mut dyn EditorView,
    ) -> Result<bool> {
        if position_of(self.model[tier].runs(section), uid).is_none() {
            return Err(SequenceError::EntryNotFound(uid));
        }
        if !view.confirm(REMOVE_RUN_PROMPT) {
            return Ok(false);
        }
        self.editing.set_run_editing(tier, uid, false);
        let list = self.model[tier].runs_mut(section);
        if let Some(index) = position_of(list, uid) {
            list.remove(index);
        }
        log::debug!("removed run {} from {}.{}", uid, tier, section);
        view.render(self, tier);
        view.mark_dirty();
        Ok(true)
    }

    /// Let `driver` reorder a live run list, then re-render
    pub fn reorder_runs(
        &mut self,
        tier: Tier,
        section: RunSection,
        driver: &mut dyn ReorderDriver<RunEntry>,
        view: &mut dyn EditorView,
    ) -> bool {
        let moved = driver.reorder(self.model[tier].runs_mut(section));
        if moved {
            log::debug!("reordered {}.{}", tier, section);
            view.render(self, tier);
            view.mark_dirty();
        }
        moved
    }

    /// Apply `edit` to one run entry and mark the session dirty
    pub fn update_run<F>(
        &mut self,
        tier: Tier,
        section: RunSection,
        uid: EntryId,
        view: &mut dyn EditorView,
        edit: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut RunEntry),
    {
        let entry = find_mut(self.model[tier].runs_mut(section), uid)?;
        edit(entry.entry_mut());
        view.mark_dirty();
        Ok(())
    }

    pub fn set_run_name(
        &mut self,
        tier: Tier,
        section: RunSection,
        uid: EntryId,
        run: &str,
        view: &mut dyn EditorView,
    ) -> Result<()> {
        let run = run.trim().to_string();
        self.update_run(tier, section, uid, view, |entry| entry.run = run)
    }

    /// Set a level bound; the value is normalized like hydrated levels
    pub fn set_run_level(
        &mut self,
        tier: Tier,
        section: RunSection,
        uid: EntryId,
        bound: LevelBound,
        level: Option<f64>,
        view: &mut dyn EditorView,
    ) -> Result<()> {
        let level = normalize_run_numeric_value(level);
        self.update_run(tier, section, uid, view, |entry| match bound {
            LevelBound::Min => entry.min_level = level,
            LevelBound::Max => entry.max_level = level,
        })
    }

    pub fn set_run_flag(
        &mut self,
        tier: Tier,
        section: RunSection,
        uid: EntryId,
        flag: RunFlag,
        enabled: bool,
        view: &mut dyn EditorView,
    ) -> Result<()> {
        self.update_run(tier, section, uid, view, |entry| entry.set_flag(flag, enabled))
    }

    pub fn set_run_editing(
        &mut self,
        tier: Tier,
        uid: EntryId,
        enabled: bool,
        view: &mut dyn EditorView,
    ) {
        self.editing.set_run_editing(tier, uid, enabled);
        view.render(self, tier);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::RecordingView;
    use super::*;
    use crate::catalog::HealthField;
    use serde_json::json;

    fn config_levels(editor: &SequenceEditor, tier: Tier) -> Vec<Option<f64>> {
        editor.model()[tier]
            .config_settings
            .iter()
            .map(|entry| entry.level)
            .collect()
    }

    #[test]
    fn test_move_to() {
        let mut list: Vec<Tracked<char>> = "abcd".chars().map(Tracked::identified).collect();
        let uid_a = list[0].ensure_uid();
        let uid_d = list[3].ensure_uid();

        assert!(MoveTo { uid: uid_a, index: 2 }.reorder(&mut list));
        assert_eq!(list.iter().map(|e| **e).collect::<String>(), "bcad");

        assert!(MoveTo { uid: uid_d, index: 0 }.reorder(&mut list));
        assert_eq!(list.iter().map(|e| **e).collect::<String>(), "dbca");

        assert!(!MoveTo { uid: uid_d, index: 0 }.reorder(&mut list));
        assert!(MoveTo { uid: uid_d, index: 99 }.reorder(&mut list));
        assert_eq!(list.iter().map(|e| **e).collect::<String>(), "bcad");
    }

    #[test]
    fn test_add_config_opens_editor() {
        let mut editor = SequenceEditor::hydrate(&json!({}));
        let mut view = RecordingView::default();
        let uid = editor.add_config(Tier::Nightmare, &mut view);

        assert_eq!(editor.model()[Tier::Nightmare].config_settings.len(), 1);
        assert!(editor.editing().is_config_editing(Tier::Nightmare, uid));
        assert_eq!(view.renders, vec![Tier::Nightmare]);
        assert_eq!(view.dirty, 1);

        // still empty, so it is not part of the save payload
        let value = editor.serialize().to_value().unwrap();
        assert_eq!(value["nightmare"]["configSettings"], json!([]));
        assert_eq!(
            editor.config_summary(Tier::Nightmare, uid).unwrap(),
            "No adjustments"
        );
    }

    #[test]
    fn test_config_edits() {
        let mut editor = SequenceEditor::hydrate(&json!({}));
        let mut view = RecordingView::default();
        let uid = editor.add_config(Tier::Hell, &mut view);
        editor
            .set_config_level(Tier::Hell, uid, Some(75.0), &mut view)
            .unwrap();
        editor
            .set_health_value(Tier::Hell, uid, HealthField::MercChickenAt, Some(30.0), &mut view)
            .unwrap();

        assert_eq!(
            editor.config_summary(Tier::Hell, uid).unwrap(),
            "Level ≥ 75 • Merc Chicken @ 30%"
        );
        let value = editor.serialize().to_value().unwrap();
        assert_eq!(
            value["hell"]["configSettings"],
            json!([{"level": 75, "healthSettings": {"mercChickenAt": 30}}])
        );
        assert_eq!(view.dirty, 3);
    }

    #[test]
    fn test_config_setters_drop_non_finite() {
        let mut editor = SequenceEditor::hydrate(&json!({
            "normal": {"configSettings": [{"level": 10, "healthSettings": {"chickenAt": 30}}]}
        }));
        let uid = editor.model()[Tier::Normal].config_settings[0].ensure_uid();
        let mut view = RecordingView::default();
        editor
            .set_config_level(Tier::Normal, uid, Some(f64::NAN), &mut view)
            .unwrap();
        editor
            .set_health_value(Tier::Normal, uid, HealthField::ChickenAt, Some(f64::INFINITY), &mut view)
            .unwrap();
        editor
            .set_health_value(Tier::Normal, uid, HealthField::ManaPotionAt, Some(f64::NAN), &mut view)
            .unwrap();

        let entry = &editor.model()[Tier::Normal].config_settings[0];
        assert_eq!(entry.level, None);
        assert!(entry.health_settings.is_empty());

        let first = editor.serialize().to_value().unwrap();
        assert_eq!(first["normal"]["configSettings"], json!([]));
        let second = crate::adapter::serialize(&crate::adapter::hydrate(&first))
            .to_value()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_level_drops_non_finite() {
        let mut editor = SequenceEditor::hydrate(&json!({
            "hell": {"quests": [{"run": "baal", "minLevel": 80, "maxLevel": 90}]}
        }));
        let uid = editor.model()[Tier::Hell].quests[0].ensure_uid();
        let mut view = RecordingView::default();
        for (bound, value) in [(LevelBound::Min, f64::NAN), (LevelBound::Max, f64::NEG_INFINITY)] {
            editor
                .set_run_level(Tier::Hell, RunSection::Quests, uid, bound, Some(value), &mut view)
                .unwrap();
        }

        let first = editor.serialize().to_value().unwrap();
        assert_eq!(first["hell"]["quests"], json!([{"run": "baal"}]));
        let second = crate::adapter::serialize(&crate::adapter::hydrate(&first))
            .to_value()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_remove_config_resolves_index_after_reorder() {
        let mut editor = SequenceEditor::hydrate(&json!({
            "normal": {"configSettings": [{"level": 10}, {"level": 20}, {"level": 30}]}
        }));
        let uid = editor.model()[Tier::Normal].config_settings[0].ensure_uid();
        let mut view = RecordingView::confirming();
        editor.set_config_editing(Tier::Normal, uid, true, &mut view);

        assert!(editor.reorder_configs(Tier::Normal, &mut MoveTo { uid, index: 2 }, &mut view));
        assert_eq!(
            config_levels(&editor, Tier::Normal),
            vec![Some(20.0), Some(30.0), Some(10.0)]
        );

        assert!(editor.remove_config(Tier::Normal, uid, &mut view).unwrap());
        assert_eq!(
            config_levels(&editor, Tier::Normal),
            vec![Some(20.0), Some(30.0)]
        );
        assert!(!editor.editing().is_config_editing(Tier::Normal, uid));
        assert_eq!(view.prompts, vec![REMOVE_CONFIG_PROMPT.to_string()]);
        assert!(matches!(
            editor.remove_config(Tier::Normal, uid, &mut view),
            Err(SequenceError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_remove_config_declined() {
        let mut editor = SequenceEditor::hydrate(&json!({
            "normal": {"configSettings": [{"level": 10}]}
        }));
        let uid = editor.model()[Tier::Normal].config_settings[0].ensure_uid();
        let mut view = RecordingView::default();
        assert!(!editor.remove_config(Tier::Normal, uid, &mut view).unwrap());
        assert_eq!(editor.model()[Tier::Normal].config_settings.len(), 1);
        assert!(view.renders.is_empty());
        assert_eq!(view.dirty, 0);
    }

    #[test]
    fn test_reorder_without_change_does_not_render() {
        let mut editor = SequenceEditor::hydrate(&json!({
            "normal": {"configSettings": [{"level": 10}]}
        }));
        let uid = editor.model()[Tier::Normal].config_settings[0].ensure_uid();
        let mut view = RecordingView::default();
        assert!(!editor.reorder_configs(Tier::Normal, &mut MoveTo { uid, index: 0 }, &mut view));
        assert!(view.renders.is_empty());
    }

    #[test]
    fn test_run_list_editing() {
        let mut editor = SequenceEditor::hydrate(&json!({
            "normal": {"beforeQuests": [{"run": "den"}]}
        }));
        let mut view = RecordingView::confirming();
        let uid = editor.add_run(Tier::Normal, RunSection::BeforeQuests, &mut view);
        assert!(editor.editing().is_run_editing(Tier::Normal, uid));

        // unnamed runs are not saved
        let value = editor.serialize().to_value().unwrap();
        assert_eq!(value["normal"]["beforeQuests"], json!([{"run": "den"}]));

        editor
            .set_run_name(Tier::Normal, RunSection::BeforeQuests, uid, " pit ", &mut view)
            .unwrap();
        editor
            .set_run_level(
                Tier::Normal,
                RunSection::BeforeQuests,
                uid,
                LevelBound::Min,
                Some(23.6),
                &mut view,
            )
            .unwrap();
        editor
            .set_run_flag(
                Tier::Normal,
                RunSection::BeforeQuests,
                uid,
                RunFlag::SkipTownChores,
                true,
                &mut view,
            )
            .unwrap();
        editor.reorder_runs(
            Tier::Normal,
            RunSection::BeforeQuests,
            &mut MoveTo { uid, index: 0 },
            &mut view,
        );

        let value = editor.serialize().to_value().unwrap();
        assert_eq!(
            value["normal"]["beforeQuests"],
            json!([
                {"run": "pit", "minLevel": 24, "skipTownChores": true},
                {"run": "den"}
            ])
        );

        assert!(editor
            .remove_run(Tier::Normal, RunSection::BeforeQuests, uid, &mut view)
            .unwrap());
        assert!(!editor.editing().is_run_editing(Tier::Normal, uid));
        assert_eq!(view.prompts, vec![REMOVE_RUN_PROMPT.to_string()]);
        assert_eq!(editor.model()[Tier::Normal].before_quests.len(), 1);
    }

    #[test]
    fn test_unknown_entry() {
        let mut editor = SequenceEditor::hydrate(&json!({}));
        let mut view = RecordingView::default();
        let stray = Tracked::identified(()).ensure_uid();
        assert!(editor
            .set_config_level(Tier::Normal, stray, Some(1.0), &mut view)
            .is_err());
        assert!(editor
            .set_run_name(Tier::Normal, RunSection::Quests, stray, "pit", &mut view)
            .is_err());
        assert!(editor.config_summary(Tier::Normal, stray).is_err());
        assert_eq!(view.dirty, 0);
    }
}
