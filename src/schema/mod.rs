//! Schema validation for untrusted import payloads.
//!
//! Parses a raw JSON payload into a typed [`AssetBundle`] for a declared
//! asset kind. Malformed JSON fails with `ImportError::Parse`; well-formed
//! payloads whose entries are missing required fields fail with
//! `ImportError::Schema` naming the entry index and field. Pure function of
//! its input, no side effects.

use serde_json::Value;

use crate::domain::{AssetBundle, AssetEntry, AssetKind, LoreEntry, TransformScript};
use crate::error::ImportError;

/// Required fields per asset kind, checked before typed deserialization
fn required_fields(kind: AssetKind) -> &'static [&'static str] {
    match kind {
        AssetKind::Worldbook => &["name", "keys", "content"],
        AssetKind::RegexScript => &["name", "find", "replace"],
    }
}

/// Validate a raw payload as a bundle of the declared kind.
///
/// An empty entry sequence is valid and yields an empty bundle.
pub fn validate(payload: &str, kind: AssetKind) -> Result<AssetBundle, ImportError> {
    let value: Value = serde_json::from_str(payload).map_err(ImportError::parse)?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ImportError::schema(format!(
                "expected an array of entries, got {}",
                json_type_name(&other)
            )))
        }
    };

    // First pass: structural checks with precise positions, so one typed
    // deserialize failure cannot mask problems in later entries.
    let mut problems = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        match item {
            Value::Object(map) => {
                for field in required_fields(kind) {
                    match map.get(*field) {
                        None => problems.push(format!("entry {}: missing field '{}'", idx, field)),
                        Some(v) if !field_shape_ok(kind, field, v) => problems.push(format!(
                            "entry {}: field '{}' has the wrong type",
                            idx, field
                        )),
                        Some(_) => {}
                    }
                }
            }
            other => problems.push(format!(
                "entry {}: expected an object, got {}",
                idx,
                json_type_name(other)
            )),
        }
    }

    if !problems.is_empty() {
        return Err(ImportError::schema(problems.join("; ")));
    }

    // Second pass: typed deserialization into entries
    let mut entries = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let entry = match kind {
            AssetKind::Worldbook => serde_json::from_value::<LoreEntry>(item)
                .map(AssetEntry::Lore)
                .map_err(|e| ImportError::schema(format!("entry {}: {}", idx, e)))?,
            AssetKind::RegexScript => serde_json::from_value::<TransformScript>(item)
                .map(AssetEntry::Script)
                .map_err(|e| ImportError::schema(format!("entry {}: {}", idx, e)))?,
        };
        entries.push(entry);
    }

    Ok(AssetBundle::new(kind, entries))
}

/// Check a required field has the expected JSON shape
fn field_shape_ok(kind: AssetKind, field: &str, value: &Value) -> bool {
    match (kind, field) {
        (AssetKind::Worldbook, "keys") => {
            value.is_array() && value.as_array().is_some_and(|a| a.iter().all(Value::is_string))
        }
        _ => value.is_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_worldbook_payload() {
        let payload = r#"[
            {"name": "Ancient Gate", "keys": ["gate", "ruins"], "content": "A sealed gate.", "order": 5},
            {"name": "River Spirit", "keys": ["river"], "content": "Lives under the bridge."}
        ]"#;

        let bundle = validate(payload, AssetKind::Worldbook).unwrap();
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.entries[0].identity_key(), "Ancient Gate");
        assert_eq!(bundle.kind, AssetKind::Worldbook);
    }

    #[test]
    fn test_valid_regex_payload() {
        let payload = r#"[
            {"name": "smart quotes", "find": "''", "replace": "\"", "affects_output": true}
        ]"#;

        let bundle = validate(payload, AssetKind::RegexScript).unwrap();
        assert_eq!(bundle.len(), 1);
        assert_eq!(bundle.entries[0].identity_key(), "smart quotes");
    }

    #[test]
    fn test_empty_array_is_valid() {
        let bundle = validate("[]", AssetKind::Worldbook).unwrap();
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = validate("not json at all {", AssetKind::Worldbook).unwrap_err();
        assert!(matches!(err, ImportError::Parse { .. }));
    }

    #[test]
    fn test_non_array_is_schema_error() {
        let err = validate(r#"{"name": "x"}"#, AssetKind::Worldbook).unwrap_err();
        assert!(matches!(err, ImportError::Schema { .. }));
        assert!(err.to_string().contains("expected an array"));
    }

    #[test]
    fn test_missing_field_names_entry_and_field() {
        let payload = r#"[
            {"name": "ok", "keys": [], "content": "fine"},
            {"name": "broken", "keys": []}
        ]"#;

        let err = validate(payload, AssetKind::Worldbook).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("entry 1"));
        assert!(msg.contains("'content'"));
    }

    #[test]
    fn test_wrong_field_type_is_schema_error() {
        let payload = r#"[{"name": "x", "keys": "not-a-list", "content": "y"}]"#;
        let err = validate(payload, AssetKind::Worldbook).unwrap_err();
        assert!(err.to_string().contains("wrong type"));
    }

    #[test]
    fn test_multiple_problems_reported_together() {
        let payload = r#"[{"keys": []}, 42]"#;
        let err = validate(payload, AssetKind::Worldbook).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("entry 0"));
        assert!(msg.contains("entry 1"));
    }
}
