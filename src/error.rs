//! Error types for the sequence editor core
//!
//! Hydration, normalization and serialization never fail; these errors only
//! come from the JSON text boundary and from editor calls addressed at rows
//! that do not exist.

use crate::catalog::{ConditionKey, Tier};
use crate::identity::EntryId;
use thiserror::Error;

/// Main error type for the sequence editor core
#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("Unknown difficulty: {0}")]
    UnknownTier(String),

    #[error("Unknown condition section: {0}")]
    UnknownConditionKey(String),

    #[error("Unknown run section: {0}")]
    UnknownRunSection(String),

    #[error("Unknown health field: {0}")]
    UnknownHealthField(String),

    #[error("{tier} has no editable {key}")]
    ConditionNotEditable { tier: Tier, key: ConditionKey },

    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("Invalid sequence JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(feature = "python")]
impl From<SequenceError> for pyo3::PyErr {
    fn from(err: SequenceError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyKeyError, PyValueError};
        match err {
            SequenceError::UnknownTier(_)
            | SequenceError::UnknownConditionKey(_)
            | SequenceError::UnknownRunSection(_)
            | SequenceError::UnknownHealthField(_)
            | SequenceError::EntryNotFound(_) => PyKeyError::new_err(err.to_string()),
            SequenceError::ConditionNotEditable { .. } | SequenceError::Json(_) => {
                PyValueError::new_err(err.to_string())
            }
        }
    }
}

/// Result type alias for the sequence editor core
pub type Result<T> = std::result::Result<T, SequenceError>;
