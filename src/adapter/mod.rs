//! Sequence data adapter
//!
//! Converts between the loosely-typed payload stored on disk and the strict
//! [`SequenceModel`](crate::model::SequenceModel) the editor works on.
//! Hydration accepts anything and never fails; serialization writes the
//! smallest payload that hydrates back to the same model.

mod hydrate;
mod serialize;


pub use hydrate::*;
pub use serialize::*;

use crate::coerce::normalize_run_numeric_value;
use crate::error::Result;
use crate::model::SequenceModel;

/// Hydrate a payload from JSON text. Only fails if the text is not JSON.
pub fn hydrate_str(text: &str) -> Result<SequenceModel> {
    let raw: serde_json::Value = serde_json::from_str(text)?;
    Ok(hydrate(&raw))
}

/// Bring a model back to canonical form in place.
///
/// Re-applies run level normalization and makes sure every run and config
/// entry has an identity. Running it twice changes nothing.
pub fn normalize(model: &mut SequenceModel) {
    for (_, settings) in model.iter_mut() {
        let runs = settings
            .before_quests
            .iter_mut()
            .chain(settings.quests.iter_mut())
            .chain(settings.after_quests.iter_mut());
        for entry in runs {
            entry.min_level = normalize_run_numeric_value(entry.min_level);
            entry.max_level = normalize_run_numeric_value(entry.max_level);
            entry.ensure_uid();
        }
        for entry in settings.config_settings.iter() {
            entry.ensure_uid();
        }
    }
}
