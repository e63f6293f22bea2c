//! Form snapshot model.
//!
//! # Invariants
//! - Field ids are unique; ordering carries no meaning.
//! - Serialized form is a flat JSON object of string values.
//! - Reading accepts any JSON object: non-string entries (file inputs were
//!   stored as `{}` by older pages) are dropped, the string entries survive.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Point-in-time capture of form field values keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    fields: BTreeMap<String, String>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one field value, replacing any previous value.
    pub fn insert(&mut self, field_id: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field_id.into(), value.into());
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.fields.get(field_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates `(field_id, value)` pairs in field-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(field_id, value)| (field_id.as_str(), value.as_str()))
    }
}

impl<'de> Deserialize<'de> for FormSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let total = raw.len();
        let fields: BTreeMap<String, String> = raw
            .into_iter()
            .filter_map(|(field_id, value)| match value {
                Value::String(text) => Some((field_id, text)),
                _ => None,
            })
            .collect();

        if fields.len() < total {
            warn!(
                "event=snapshot_decode module=model status=skip reason=non_string_values dropped={}",
                total - fields.len()
            );
        }
        Ok(Self { fields })
    }
}

impl<K, V> FromIterator<(K, V)> for FormSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(field_id, value)| (field_id.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FormSnapshot;

    #[test]
    fn serializes_as_flat_object() {
        let snapshot: FormSnapshot = [("buyerName", "ACME"), ("agreementDate", "2024-03-05")]
            .into_iter()
            .collect();

        let json = serde_json::to_value(&snapshot).expect("serialize snapshot");
        assert_eq!(json["buyerName"], "ACME");
        assert_eq!(json["agreementDate"], "2024-03-05");
    }

    #[test]
    fn drops_non_string_values_and_keeps_strings() {
        let snapshot = serde_json::from_str::<FormSnapshot>(
            r#"{"buyerName": "ACME", "signatureFile": {}, "amount": 12, "flag": null}"#,
        )
        .expect("object decodes");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("buyerName"), Some("ACME"));
    }

    #[test]
    fn rejects_non_object_documents() {
        for input in ["[1, 2]", "null", "\"text\"", "{broken"] {
            assert!(serde_json::from_str::<FormSnapshot>(input).is_err(), "input: {input}");
        }
    }

    #[test]
    fn insert_replaces_existing_value() {
        let mut snapshot = FormSnapshot::new();
        snapshot.insert("seller", "old");
        snapshot.insert("seller", "new");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("seller"), Some("new"));
    }
}
