//! Property tests for coercion utilities

use proptest::prelude::*;
use serde_json::Value;

use crate::coerce::{normalize_run_numeric_value, number_value, parse_optional_number, LEVEL_RANGE};

/// Arbitrary scalar-ish JSON input as it might show up in a stored payload
fn raw_scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..=1000).prop_map(Value::from),
        (-1000.0f64..1000.0).prop_map(Value::from),
        (-1000i64..=1000).prop_map(|n| Value::String(n.to_string())),
        "[ a-z0-9.+-]{0,8}".prop_map(Value::String),
    ]
}

proptest! {
    /// Parsing an already-parsed number gives the same number back
    #[test]
    fn prop_parse_is_idempotent(raw in raw_scalar_strategy()) {
        let once = parse_optional_number(&raw);
        let twice = once.and_then(|v| parse_optional_number(&Value::from(v)));
        prop_assert_eq!(once, twice);
    }

    /// The integer wire form parses back to the same value
    #[test]
    fn prop_wire_number_parses_back(raw in raw_scalar_strategy()) {
        if let Some(v) = parse_optional_number(&raw) {
            prop_assert_eq!(parse_optional_number(&number_value(v)), Some(v));
        }
    }

    /// Normalized levels are whole numbers inside the level range and stable
    #[test]
    fn prop_normalized_levels_in_range(v in -500.0f64..500.0) {
        let normalized = normalize_run_numeric_value(Some(v)).unwrap();
        prop_assert!(LEVEL_RANGE.contains(&normalized));
        prop_assert_eq!(normalized.fract(), 0.0);
        prop_assert_eq!(normalize_run_numeric_value(Some(normalized)), Some(normalized));
    }

    /// Integer strings parse to their integer value
    #[test]
    fn prop_integer_strings_parse(n in -100000i64..100000) {
        prop_assert_eq!(parse_optional_number(&Value::String(n.to_string())), Some(n as f64));
    }
}
