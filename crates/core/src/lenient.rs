//! Forgiving field deserializers for upstream pick records.
//!
//! The feed is produced by a third party and field types drift between
//! releases (odds as strings, lines as strings, payloads as objects). Each
//! helper here accepts any JSON value and yields `None` when it cannot make
//! sense of it, so one odd field never costs us the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text field: strings pass through, numbers and booleans are stringified.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Numeric field: numbers or numeric strings, finite values only.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_f64(&value))
}

/// American odds: signed integer, rounded when delivered as a float.
pub fn odds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(i) = value.as_i64() {
        return Ok(Some(i));
    }
    Ok(as_f64(&value).map(|f| f.round() as i64))
}

/// Deep-link payload: normally a JSON document in a string. An inline
/// object is re-serialized so the resolver sees one shape.
pub fn payload<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Object(_) => Some(value.to_string()),
        _ => None,
    })
}

fn as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_start_matches('+').parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "string")]
        text: Option<String>,
        #[serde(default, deserialize_with = "number")]
        num: Option<f64>,
        #[serde(default, deserialize_with = "odds")]
        odds: Option<i64>,
        #[serde(default, deserialize_with = "payload")]
        payload: Option<String>,
    }

    fn probe(value: Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_fields_are_none() {
        let p = probe(json!({}));
        assert!(p.text.is_none());
        assert!(p.num.is_none());
        assert!(p.odds.is_none());
        assert!(p.payload.is_none());
    }

    #[test]
    fn test_wrong_types_degrade() {
        let p = probe(json!({"text": [1, 2], "num": {"a": 1}, "odds": true, "payload": 7}));
        assert!(p.text.is_none());
        assert!(p.num.is_none());
        assert!(p.odds.is_none());
        assert!(p.payload.is_none());
    }

    #[test]
    fn test_numeric_strings() {
        let p = probe(json!({"num": " 12.5 ", "odds": "+150"}));
        assert_eq!(p.num, Some(12.5));
        assert_eq!(p.odds, Some(150));

        let p = probe(json!({"odds": -110.4}));
        assert_eq!(p.odds, Some(-110));

        let p = probe(json!({"num": "NaN"}));
        assert!(p.num.is_none());
    }

    #[test]
    fn test_payload_object_is_reserialized() {
        let p = probe(json!({"payload": {"fanduel": "https://fd/{state}"}}));
        let raw = p.payload.unwrap();
        let back: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(back["fanduel"], "https://fd/{state}");
    }
}
