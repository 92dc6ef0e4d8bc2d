//! Deserializers for API fields whose JSON type is not stable across records
//! (numbers sent as strings, strings sent as numbers, nulls).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept string, number, bool or null and keep it as a String ("" for null).
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    })
}

/// Like [`string`], for a list of ids that may arrive as objects with `_id`.
pub fn id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = v else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            Value::Object(map) => map.get("_id").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect())
}

/// Optional id that may arrive as a plain string or as a populated object.
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Object(map)) => map.get("_id").and_then(Value::as_str).map(str::to_string),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct Probe {
        #[serde(deserialize_with = "string")]
        qty: String,
        #[serde(deserialize_with = "id_list")]
        warehouses: Vec<String>,
        #[serde(deserialize_with = "opt_id")]
        warehouse: Option<String>,
    }

    #[test]
    fn numbers_nulls_and_objects() {
        let p: Probe = serde_json::from_str(
            r#"{"qty": 12.5, "warehouses": ["a", {"_id": "b", "name": "B"}, 3], "warehouse": {"_id": "w1"}}"#,
        )
        .unwrap();
        assert_eq!(p.qty, "12.5");
        assert_eq!(p.warehouses, vec!["a", "b"]);
        assert_eq!(p.warehouse.as_deref(), Some("w1"));

        let p: Probe = serde_json::from_str(r#"{"qty": null, "warehouse": ""}"#).unwrap();
        assert_eq!(p.qty, "");
        assert!(p.warehouses.is_empty());
        assert_eq!(p.warehouse, None);
    }
}
