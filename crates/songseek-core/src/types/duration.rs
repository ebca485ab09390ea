//! Duration normalization for heterogeneous upstream encodings.
//!
//! Backends report durations as bare numbers, `MM:SS` strings, `HH:MM:SS`
//! strings or free text. All of them are folded into a zero-padded
//! `HH:MM:SS` string, or `None` when nothing usable is present.
//!
//! The fold works on digit runs, not on a decomposed integer: the last three
//! runs fill seconds, minutes and hours from the right. A bare `185` therefore
//! lands in the seconds slot as `00:00:185` rather than rolling over into
//! `00:03:05`. Upstream consumers rely on this shape, so it is kept.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

#[allow(clippy::unwrap_used)] // Pattern is a literal
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]+").unwrap());

/// Normalize a JSON duration value (number or string) into `HH:MM:SS`.
pub fn normalize_duration(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(_) | Value::Object(_) => None,
        Value::String(s) => normalize_duration_str(s),
        Value::Number(n) => normalize_duration_str(&n.to_string()),
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(",");
            normalize_duration_str(&joined)
        }
    }
}

/// Normalize a free-form duration string into `HH:MM:SS`.
pub fn normalize_duration_str(raw: &str) -> Option<String> {
    // Runs too long for u64 are dropped, same as non-finite numbers.
    let numbers: Vec<u64> = DIGIT_RUN
        .find_iter(raw)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    if numbers.is_empty() {
        return None;
    }

    let mut groups = [0u64; 3];
    for (slot, value) in groups.iter_mut().rev().zip(numbers.iter().rev()) {
        *slot = *value;
    }

    let [hours, minutes, seconds] = groups;
    if hours == 0 && minutes == 0 && seconds == 0 {
        return None;
    }

    Some(format!("{hours:02}:{minutes:02}:{seconds:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_clock_strings() {
        assert_eq!(normalize_duration_str("04:29"), Some("00:04:29".into()));
        assert_eq!(normalize_duration_str("1:02:03"), Some("01:02:03".into()));
        assert_eq!(normalize_duration_str("9:8:7:6"), Some("08:07:06".into()));
        assert_eq!(normalize_duration_str("时长 3分45秒"), Some("00:03:45".into()));
    }

    #[test]
    fn test_absent_inputs() {
        assert_eq!(normalize_duration(&Value::Null), None);
        assert_eq!(normalize_duration(&json!(true)), None);
        assert_eq!(normalize_duration(&json!({"s": 5})), None);
        assert_eq!(normalize_duration_str(""), None);
        assert_eq!(normalize_duration_str("unknown"), None);
    }

    #[test]
    fn test_all_zero_is_absent() {
        assert_eq!(normalize_duration(&json!(0)), None);
        assert_eq!(normalize_duration_str("0"), None);
        assert_eq!(normalize_duration_str("00:00:00"), None);
        assert_eq!(normalize_duration_str("00:00"), None);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(normalize_duration(&json!("03:05")), Some("00:03:05".into()));
        assert_eq!(normalize_duration(&json!(3.5)), Some("00:03:05".into()));
        assert_eq!(normalize_duration(&json!(["1", 2])), Some("00:01:02".into()));
    }

    /// A bare seconds count is not rolled over into minutes.
    #[test]
    fn test_bare_seconds_are_not_rolled_over() {
        assert_eq!(normalize_duration(&json!(185)), Some("00:00:185".into()));
        assert_eq!(normalize_duration_str("185"), Some("00:00:185".into()));
    }

    #[test]
    fn test_overflowing_run_is_dropped() {
        assert_eq!(
            normalize_duration_str("3:99999999999999999999999"),
            Some("00:00:03".into())
        );
    }

    proptest! {
        #[test]
        fn prop_output_is_padded_clock(input in ".{0,40}") {
            if let Some(out) = normalize_duration_str(&input) {
                let fields: Vec<&str> = out.split(':').collect();
                prop_assert_eq!(fields.len(), 3);
                for field in fields {
                    prop_assert!(field.len() >= 2);
                    prop_assert!(field.bytes().all(|b| b.is_ascii_digit()));
                }
            }
        }

        #[test]
        fn prop_small_clock_values_round_trip(h in 0u64..100, m in 0u64..60, s in 0u64..60) {
            let out = normalize_duration_str(&format!("{h}:{m}:{s}"));
            if h == 0 && m == 0 && s == 0 {
                prop_assert_eq!(out, None);
            } else {
                prop_assert_eq!(out, Some(format!("{h:02}:{m:02}:{s:02}")));
            }
        }

        #[test]
        fn prop_zero_groups_are_absent(zeros in prop::collection::vec("0{1,3}", 1..4)) {
            prop_assert_eq!(normalize_duration_str(&zeros.join(":")), None);
        }
    }
}
