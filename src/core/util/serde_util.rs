//! Shared serde helpers for the loosely typed backend payloads.

use serde::{Deserialize, Deserializer};

/// Accept a JSON string or a bare number and yield its string form.
///
/// Device identifiers arrive as `"INV-001"` on some endpoints and as bare
/// numbers on others.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Int(n) => n.to_string(),
        StringOrNumber::Float(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Carrier {
        #[serde(deserialize_with = "super::string_or_number")]
        id: String,
    }

    #[test]
    fn accepts_both_scalar_forms() {
        let row: Carrier = serde_json::from_value(json!({"id": "INV-001"})).unwrap();
        assert_eq!(row.id, "INV-001");

        let row: Carrier = serde_json::from_value(json!({"id": 7})).unwrap();
        assert_eq!(row.id, "7");

        assert!(serde_json::from_value::<Carrier>(json!({"id": true})).is_err());
    }
}
