//! Strict in-memory model of a leveling sequence
//!
//! Only the adapter builds these from raw input; after hydration every
//! field has its final type and legacy field names are gone.

mod entries;
mod settings;

pub use entries::*;
pub use settings::*;
