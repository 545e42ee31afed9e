//! Condition row edits: on/off toggle, threshold fields and flags

use crate::catalog::{is_condition_editable, ConditionKey, Tier};
use crate::coerce::parse_number_text;
use crate::error::{Result, SequenceError};
use crate::model::{self, create_empty_conditions, ConditionField, ConditionFlag};

use super::{EditorView, SequenceEditor};

impl SequenceEditor {
    fn ensure_condition_editable(&self, tier: Tier, key: ConditionKey) -> Result<()> {
        if is_condition_editable(tier, key) {
            Ok(())
        } else {
            Err(SequenceError::ConditionNotEditable { tier, key })
        }
    }

    /// Switch a condition row on or off.
    ///
    /// Turning it on creates an empty condition (keeping an existing one) and
    /// opens its editor; turning it off removes the condition. Either way the
    /// change is mirrored across the boundary and the tier re-rendered.
    pub fn toggle_condition(
        &mut self,
        tier: Tier,
        key: ConditionKey,
        enabled: bool,
        view: &mut dyn EditorView,
    ) -> Result<()> {
        self.ensure_condition_editable(tier, key)?;
        let slot = self.model[tier].condition_slot(key);
        if enabled {
            slot.get_or_insert_with(create_empty_conditions);
        } else {
            *slot = None;
        }
        self.editing.set_condition_editing(tier, key, enabled);
        self.commit_condition_edit(tier, key, view, true);
        Ok(())
    }

    /// Open or close the inline editor of a present condition
    pub fn set_condition_editing(
        &mut self,
        tier: Tier,
        key: ConditionKey,
        enabled: bool,
        view: &mut dyn EditorView,
    ) -> Result<()> {
        self.ensure_condition_editable(tier, key)?;
        if self.model[tier].condition(key).is_none() {
            return Ok(());
        }
        self.editing.set_condition_editing(tier, key, enabled);
        view.render(self, tier);
        Ok(())
    }

    /// Whether the condition row shows its editor; never true while the
    /// condition is switched off
    pub fn is_condition_editing(&self, tier: Tier, key: ConditionKey) -> bool {
        self.model[tier].condition(key).is_some() && self.editing.is_condition_editing(tier, key)
    }

    /// Set a numeric threshold of a present condition
    pub fn set_condition_value(
        &mut self,
        tier: Tier,
        key: ConditionKey,
        field: ConditionField,
        value: Option<f64>,
        view: &mut dyn EditorView,
    ) -> Result<()> {
        self.ensure_condition_editable(tier, key)?;
        let Some(condition) = self.model[tier].condition_slot(key).as_mut() else {
            return Ok(());
        };
        condition.set_value(field, value);
        self.commit_condition_edit(tier, key, view, false);
        Ok(())
    }

    /// Set a numeric threshold from the text of an input field
    pub fn input_condition_value(
        &mut self,
        tier: Tier,
        key: ConditionKey,
        field: ConditionField,
        text: &str,
        view: &mut dyn EditorView,
    ) -> Result<()> {
        self.set_condition_value(tier, key, field, parse_number_text(text), view)
    }

    /// Set a flag of a present condition
    pub fn set_condition_flag(
        &mut self,
        tier: Tier,
        key: ConditionKey,
        flag: ConditionFlag,
        enabled: bool,
        view: &mut dyn EditorView,
    ) -> Result<()> {
        self.ensure_condition_editable(tier, key)?;
        let Some(condition) = self.model[tier].condition_slot(key).as_mut() else {
            return Ok(());
        };
        condition.set_flag(flag, enabled);
        self.commit_condition_edit(tier, key, view, false);
        Ok(())
    }

    /// Summary line of a condition row
    pub fn condition_summary(&self, tier: Tier, key: ConditionKey) -> String {
        model::condition_summary(self.model[tier].condition(key))
    }
}
