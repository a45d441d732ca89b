//! Deserializers that tolerate the loose typing of the directory API and of
//! vector-tile feature properties, where the same field can arrive as a
//! string, a number or a boolean depending on the source.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        other => Err(D::Error::custom(format!("expected text, found {other}"))),
    }
}

pub(crate) fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    text(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|n| *n >= 0.0).map(|n| n as u64))
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected unsigned number, found {number}"))),
        Value::String(text) if text.trim().is_empty() => Ok(None),
        Value::String(text) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected unsigned number, found {text:?}"))),
        other => Err(D::Error::custom(format!("expected number, found {other}"))),
    }
}

pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0.0),
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| D::Error::custom("cost out of range")),
        Value::String(text) if text.trim().is_empty() => Ok(0.0),
        Value::String(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected decimal, found {text:?}"))),
        other => Err(D::Error::custom(format!("expected decimal, found {other}"))),
    }
}

/// Accepts `true`, `1`, `"1"` and `"true"` as set; everything else is unset.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_i64().is_some_and(|n| n != 0),
        Value::String(text) => matches!(text.trim(), "1" | "true" | "TRUE" | "True"),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::text")]
        text: Option<String>,
        #[serde(default, deserialize_with = "super::number")]
        number: Option<u64>,
        #[serde(default, deserialize_with = "super::decimal")]
        decimal: f64,
        #[serde(default, deserialize_with = "super::flag")]
        flag: bool,
    }

    fn probe(value: serde_json::Value) -> Probe {
        serde_json::from_value(value).expect("probe should deserialize")
    }

    #[test]
    fn text_accepts_scalars() {
        assert_eq!(probe(json!({"text": "Primary"})).text.as_deref(), Some("Primary"));
        assert_eq!(probe(json!({"text": 420})).text.as_deref(), Some("420"));
        assert_eq!(probe(json!({"text": null})).text, None);
        assert_eq!(probe(json!({})).text, None);
    }

    #[test]
    fn text_rejects_objects() {
        let result = serde_json::from_value::<Probe>(json!({"text": {"nested": true}}));
        assert!(result.is_err());
    }

    #[test]
    fn number_parses_strings() {
        assert_eq!(probe(json!({"number": "100012345"})).number, Some(100_012_345));
        assert_eq!(probe(json!({"number": 7})).number, Some(7));
        assert_eq!(probe(json!({"number": ""})).number, None);
    }

    #[test]
    fn decimal_parses_laravel_strings() {
        assert!((probe(json!({"decimal": "12.50"})).decimal - 12.5).abs() < f64::EPSILON);
        assert!((probe(json!({"decimal": 3})).decimal - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn flag_accepts_integers() {
        assert!(probe(json!({"flag": 1})).flag);
        assert!(probe(json!({"flag": "true"})).flag);
        assert!(!probe(json!({"flag": 0})).flag);
        assert!(!probe(json!({})).flag);
    }
}
