//! Cross-difficulty condition synchronization
//!
//! `normal.next` mirrors `nightmare.stay` and `nightmare.next` mirrors
//! `hell.stay`. An edit on either side of a boundary is copied to the other
//! side and the other tier is re-rendered. Re-rendering can fire change
//! events that would call back into the synchronizer, so a propagation is
//! held open by a [`SyncGuard`] and any call made while it is held is a
//! no-op.


use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::catalog::{Boundary, ConditionKey, Tier};
use crate::model::SequenceModel;

/// Re-entrancy state of one editing session's synchronizer
#[derive(Debug, Clone, Default)]
pub struct ConditionSynchronizer {
    syncing: Arc<AtomicBool>,
}

/// Held for the whole of one propagation; releases on drop
#[derive(Debug)]
#[must_use = "the propagation ends when the guard is dropped"]
pub struct SyncGuard {
    syncing: Arc<AtomicBool>,
}

impl Drop for SyncGuard {
    fn drop(&mut self) {
        self.syncing.store(false, Ordering::Release);
    }
}

impl ConditionSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a propagation, or `None` if one is already in progress
    pub fn try_begin(&self) -> Option<SyncGuard> {
        if self.syncing.swap(true, Ordering::AcqRel) {
            log::trace!("condition sync already in progress, ignoring nested call");
            return None;
        }
        Some(SyncGuard {
            syncing: Arc::clone(&self.syncing),
        })
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::Acquire)
    }
}

/// Copy the condition at `(tier, key)` to the other side of its boundary.
///
/// The copy is a structural clone, and absence is copied as absence.
/// Returns the tier that was written, or `None` for conditions that sit on
/// no boundary (`normal.stay`, `hell.next`).
pub fn propagate(model: &mut SequenceModel, tier: Tier, key: ConditionKey) -> Option<Tier> {
    let (target, target_key) = Boundary::mirror(tier, key)?;
    let value = model[tier].condition(key).cloned();
    log::debug!(
        "sync {}.{} -> {}.{} ({})",
        tier,
        key,
        target,
        target_key,
        if value.is_some() { "set" } else { "cleared" }
    );
    *model[target].condition_slot(target_key) = value;
    Some(target)
}

/// Make every boundary agree, taking the lower tier's `next` condition as
/// the source. Returns the tiers whose `stay` condition changed.
pub fn reconcile(model: &mut SequenceModel) -> Vec<Tier> {
    let mut changed = Vec::new();
    for boundary in crate::catalog::BOUNDARIES {
        if model[boundary.lower].next_difficulty_conditions
            != model[boundary.upper].stay_difficulty_conditions
        {
            propagate(model, boundary.lower, ConditionKey::Next);
            changed.push(boundary.upper);
        }
    }
    changed
}
