//! Loose readings of caller-supplied JSON values.
//!
//! Request fields are accepted as whatever JSON the caller sent. These
//! helpers decide when such a value counts as "given" and how it reads
//! once dropped into prompt text.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `false` for `null`, `false`, `0`, and `""`; `true` otherwise.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a value inside a prompt line.
///
/// Strings are used as-is, arrays are comma-joined with `null` elements
/// left blank, and objects collapse to `[object Object]`.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_f64() || f.fract() != 0.0 || f.abs() >= 1e21 => n.to_string(),
            Some(f) => format!("{f:.0}"),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Keep an explicit `null` as `Some(Value::Null)` instead of `None`.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&value), "{value} should be falsy");
        }
        for value in [json!("x"), json!(3), json!(true), json!([]), json!({})] {
            assert!(is_truthy(&value), "{value} should be truthy");
        }
    }

    #[test]
    fn scalars_render_as_plain_text() {
        assert_eq!(display_text(&json!("Slack")), "Slack");
        assert_eq!(display_text(&json!(3)), "3");
        assert_eq!(display_text(&json!(3.0)), "3");
        assert_eq!(display_text(&json!(2.5)), "2.5");
        assert_eq!(display_text(&json!(true)), "true");
        assert_eq!(display_text(&json!(null)), "null");
    }

    #[test]
    fn collections_render_like_string_interpolation() {
        assert_eq!(display_text(&json!(["Priya", null, 2])), "Priya,,2");
        assert_eq!(display_text(&json!({ "name": "Priya" })), "[object Object]");
    }
}
