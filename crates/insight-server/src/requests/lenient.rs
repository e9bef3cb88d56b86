//! Forgiving field deserializers for request bodies.
//!
//! Browser forms send numbers as strings and clear inputs as `""`. Each
//! helper is used with `#[serde(default, deserialize_with = ...)]`, so an
//! absent key stays `None` and the helper only runs for keys that are present.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Integer as a JSON number or numeric string. `null` and `""` read as
/// absent.
pub fn count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(truncate))
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid integer: {n}"))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid integer: {s:?}"))),
        other => Err(D::Error::custom(format!("expected an integer, got {other}"))),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

/// Nullable text. `null` and `""` become `Some(None)`; numbers are kept as
/// their decimal text.
pub fn nullable_text<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Some(None)),
        Value::String(s) if s.is_empty() => Ok(Some(None)),
        Value::String(s) => Ok(Some(Some(s))),
        Value::Number(n) => Ok(Some(Some(n.to_string()))),
        other => Err(D::Error::custom(format!("expected text, got {other}"))),
    }
}

/// Like [`nullable_text`], but a numeric zero also clears the score.
pub fn score<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) if n.as_f64().is_some_and(|v| v.abs() < f64::EPSILON) => {
            Ok(Some(None))
        }
        Value::Number(n) => Ok(Some(Some(n.to_string()))),
        other => nullable_text(other).map_err(D::Error::custom),
    }
}

/// List of strings. Anything that is not an array becomes an empty list;
/// non-string items are skipped.
pub fn list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(Some(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "count")]
        n: Option<i64>,
        #[serde(default, deserialize_with = "nullable_text")]
        t: Option<Option<String>>,
        #[serde(default, deserialize_with = "list")]
        l: Option<Vec<String>>,
        #[serde(default, deserialize_with = "score")]
        s: Option<Option<String>>,
    }

    fn fields(value: serde_json::Value) -> Fields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn absent_keys_stay_none() {
        let p = fields(json!({}));
        assert_eq!(p.n, None);
        assert_eq!(p.t, None);
        assert_eq!(p.l, None);
    }

    #[test]
    fn counts_accept_numbers_and_numeric_strings() {
        assert_eq!(fields(json!({ "n": 4 })).n, Some(4));
        assert_eq!(fields(json!({ "n": "12" })).n, Some(12));
        assert_eq!(fields(json!({ "n": " 7 " })).n, Some(7));
        assert_eq!(fields(json!({ "n": 2.9 })).n, Some(2));
        assert_eq!(fields(json!({ "n": "" })).n, None);
        assert_eq!(fields(json!({ "n": null })).n, None);
        assert!(serde_json::from_value::<Fields>(json!({ "n": "many" })).is_err());
        assert!(serde_json::from_value::<Fields>(json!({ "n": true })).is_err());
    }

    #[test]
    fn nullable_text_distinguishes_cleared_from_absent() {
        assert_eq!(fields(json!({ "t": null })).t, Some(None));
        assert_eq!(fields(json!({ "t": "" })).t, Some(None));
        assert_eq!(fields(json!({ "t": 85 })).t, Some(Some("85".into())));
        assert_eq!(fields(json!({ "t": "0.5" })).t, Some(Some("0.5".into())));
    }

    #[test]
    fn zero_score_reads_as_null() {
        assert_eq!(fields(json!({ "s": 0 })).s, Some(None));
        assert_eq!(fields(json!({ "s": 0.0 })).s, Some(None));
        assert_eq!(fields(json!({ "s": 85 })).s, Some(Some("85".into())));
        assert_eq!(fields(json!({ "s": "0" })).s, Some(Some("0".into())));
        assert_eq!(fields(json!({ "s": "" })).s, Some(None));
        assert_eq!(fields(json!({ "s": null })).s, Some(None));
    }

    #[test]
    fn lists_fall_back_to_empty() {
        assert_eq!(
            fields(json!({ "l": ["a", 1, "b"] })).l,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(fields(json!({ "l": "a,b" })).l, Some(vec![]));
        assert_eq!(fields(json!({ "l": null })).l, Some(vec![]));
    }
}
