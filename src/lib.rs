//! Sequence Editor Core - data model of the leveling sequence editor
//!
//! A sequence is three difficulty tiers, each with ordered run lists, level
//! gated config overrides and the conditions for moving on to (or staying
//! in) a tier. This crate turns loosely typed stored payloads into that
//! model, keeps the conditions on either side of a tier boundary in sync
//! while the user edits, and writes the minimal payload back out.
//!
//! Python bindings for the view layer are available behind the `python`
//! feature.

pub mod adapter;
pub mod catalog;
pub mod coerce;
pub mod editor;
pub mod error;
pub mod identity;
pub mod model;
pub mod sync;

#[cfg(feature = "python")]
mod bindings;

pub use adapter::{hydrate, hydrate_str, serialize, SequencePayload};
pub use catalog::{ConditionKey, RunSection, Tier};
pub use editor::{EditorView, HeadlessView, SequenceEditor};
pub use error::{Result, SequenceError};
pub use identity::{EntryId, Tracked};
pub use model::{create_empty_model, SequenceModel};
