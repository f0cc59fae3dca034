//! Tolerant field decoders for the JSON documents.
//!
//! The documents are hand-edited, so a single wrong-typed leaf (`null`
//! name, numeric id, quoted number) must not reject the whole document.
//! Used through `#[serde(deserialize_with = "...")]`; containers keep
//! `#[serde(default)]` for missing fields.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::utils::log;

fn text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Scalar as text; anything else becomes `""`.
pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(text(Value::deserialize(d)?).unwrap_or_default())
}

pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(text(Value::deserialize(d)?))
}

/// Number or numeric string.
pub fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(number(&Value::deserialize(d)?))
}

pub fn number_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(number(&Value::deserialize(d)?).unwrap_or(0.0))
}

/// Non-negative count; fractions are truncated.
pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let n = number(&Value::deserialize(d)?).unwrap_or(0.0);
    Ok(n.clamp(0.0, u32::MAX as f64) as u32)
}

/// Numeric array; non-numeric entries are dropped.
pub fn numbers<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items.iter().filter_map(number).collect(),
        _ => Vec::new(),
    })
}

pub fn object<'de, D: Deserializer<'de>>(d: D) -> Result<Map<String, Value>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

/// Array of records; entries that fail to decode are skipped.
pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(d)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                log::warn(&format!("skipping malformed entry: {err}"));
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Row {
        #[serde(deserialize_with = "super::string")]
        name: String,
        #[serde(deserialize_with = "super::opt_number")]
        score: Option<f64>,
        #[serde(deserialize_with = "super::count")]
        hits: u32,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Table {
        #[serde(deserialize_with = "super::list")]
        rows: Vec<Row>,
        #[serde(deserialize_with = "super::numbers")]
        series: Vec<f64>,
    }

    #[test]
    fn test_scalars_coerce_instead_of_failing() {
        let row: Row = serde_json::from_value(json!({
            "name": 7,
            "score": "0.75",
            "hits": -3
        }))
        .unwrap();
        assert_eq!(row.name, "7");
        assert_eq!(row.score, Some(0.75));
        assert_eq!(row.hits, 0);

        let row: Row = serde_json::from_value(json!({ "name": null, "score": [] })).unwrap();
        assert_eq!(row.name, "");
        assert_eq!(row.score, None);
    }

    #[test]
    fn test_list_skips_only_the_bad_entry() {
        let table: Table = serde_json::from_value(json!({
            "rows": [{ "name": "a" }, "not a row", { "name": "b", "hits": 2 }],
            "series": [1, "x", 2.5, null]
        }))
        .unwrap();
        let names: Vec<_> = table.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(table.series, vec![1.0, 2.5]);

        let table: Table = serde_json::from_value(json!({ "rows": null, "series": {} })).unwrap();
        assert!(table.rows.is_empty());
        assert!(table.series.is_empty());
    }
}
