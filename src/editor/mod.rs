//! Editing session over a sequence model
//!
//! The view layer owns rendering; this module owns the model, the editor
//! side tables and the boundary synchronizer, and tells the view when to
//! re-render and when there are unsaved changes.

mod conditions;
mod lists;
mod state;

pub use lists::*;
pub use state::*;

use serde_json::Value;

use crate::adapter::{self, SequencePayload};
use crate::catalog::{ConditionKey, Tier};
use crate::model::{create_empty_model, SequenceModel};
use crate::sync::{self, ConditionSynchronizer};

/// Callbacks the editor needs from the view layer
pub trait EditorView {
    /// Signal unsaved changes to the host page
    fn mark_dirty(&mut self);

    /// Rebuild the rows of `tier` from the current model.
    ///
    /// Change events fired while rendering may call back into `editor`.
    fn render(&mut self, editor: &mut SequenceEditor, tier: Tier);

    /// Ask the user to confirm a destructive action
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// View that renders nothing, for headless edits
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessView;

impl EditorView for HeadlessView {
    fn mark_dirty(&mut self) {}

    fn render(&mut self, _editor: &mut SequenceEditor, _tier: Tier) {}
}

/// One editing session: created from a hydrated payload (or an empty
/// skeleton), mutated by view events, serialized on save.
#[derive(Debug, Default)]
pub struct SequenceEditor {
    model: SequenceModel,
    synchronizer: ConditionSynchronizer,
    editing: EditingState,
}

impl SequenceEditor {
    pub fn new(model: SequenceModel) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }

    /// Session over a raw stored payload
    pub fn hydrate(raw: &Value) -> Self {
        Self::new(adapter::hydrate(raw))
    }

    /// Session over a brand-new sequence
    pub fn empty() -> Self {
        Self::new(create_empty_model())
    }

    pub fn model(&self) -> &SequenceModel {
        &self.model
    }

    /// Direct model access for views that edit fields themselves
    pub fn model_mut(&mut self) -> &mut SequenceModel {
        &mut self.model
    }

    pub fn into_model(self) -> SequenceModel {
        self.model
    }

    pub fn editing(&self) -> &EditingState {
        &self.editing
    }

    pub fn synchronizer(&self) -> &ConditionSynchronizer {
        &self.synchronizer
    }

    /// Snapshot for the save operation
    pub fn serialize(&self) -> SequencePayload {
        adapter::serialize(&self.model)
    }

    /// Copy `(tier, key)` across its boundary and re-render the other tier.
    ///
    /// A no-op while another propagation is in progress. Returns the tier
    /// that was updated.
    pub fn sync_conditions(
        &mut self,
        tier: Tier,
        key: ConditionKey,
        view: &mut dyn EditorView,
    ) -> Option<Tier> {
        let _guard = self.synchronizer.try_begin()?;
        let target = sync::propagate(&mut self.model, tier, key)?;
        view.render(self, target);
        Some(target)
    }

    /// Finish an edit of a boundary condition as one transaction: propagate
    /// it, mark dirty, and optionally re-render the edited tier, all while
    /// the sync guard is held.
    ///
    /// An edit fired from inside another edit's render only keeps its field
    /// change; the outer edit owns propagation, dirty marking and rendering.
    fn commit_condition_edit(
        &mut self,
        tier: Tier,
        key: ConditionKey,
        view: &mut dyn EditorView,
        render_self: bool,
    ) {
        let Some(_guard) = self.synchronizer.try_begin() else {
            return;
        };
        if let Some(target) = sync::propagate(&mut self.model, tier, key) {
            view.render(self, target);
        }
        view.mark_dirty();
        if render_self {
            view.render(self, tier);
        }
    }

    /// Make both sides of every boundary agree (lower tier's `next` wins)
    /// and re-render the tiers that changed
    pub fn reconcile_boundaries(&mut self, view: &mut dyn EditorView) {
        let Some(_guard) = self.synchronizer.try_begin() else {
            return;
        };
        let changed = sync::reconcile(&mut self.model);
        if changed.is_empty() {
            return;
        }
        view.mark_dirty();
        for tier in changed {
            view.render(self, tier);
        }
    }
}
