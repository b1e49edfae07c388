//! Lenient field readers for hand-edited JSON.
//!
//! Authors store numbers as strings, spell keys in either camelCase or
//! snake_case, and write plain strings where a language map is expected.
//! Every reader here takes a fixed key-precedence list and returns
//! `None` (caller defaults) instead of failing the document.

use serde_json::{Map, Value};

use crate::core::models::LocalizedText;
use crate::core::models::Position;

/// Return the first value present under any of the given keys.
pub fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| map.get(*k))
}

/// Read a string field. Numbers are accepted and rendered as text.
pub fn read_string(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_present(map, keys).and_then(as_string)
}

/// Coerce a single value into a string
pub fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce a single value into an f64. Strings are parsed.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Read an f64 field, defaulting when absent or unreadable
pub fn read_f64(map: &Map<String, Value>, keys: &[&str], default: f64) -> f64 {
    first_present(map, keys).and_then(as_f64).unwrap_or(default)
}

/// Read a non-negative integer field, defaulting when absent or unreadable.
/// Fractional values are truncated; negative values fall back to the default.
pub fn read_u32(map: &Map<String, Value>, keys: &[&str], default: u32) -> u32 {
    first_present(map, keys)
        .and_then(as_f64)
        .filter(|v| *v >= 0.0)
        .map_or(default, |v| {
            let truncated = v.trunc();
            if truncated > f64::from(u32::MAX) {
                u32::MAX
            } else {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    truncated as u32
                }
            }
        })
}

/// Read a node position.
///
/// Accepts a nested `"position": {x, y}` object first, then flat `x`/`y`
/// siblings on the node itself. Unreadable coordinates default to 0.
pub fn read_position(map: &Map<String, Value>) -> Position {
    if let Some(Value::Object(pos)) = map.get("position") {
        return Position::new(read_f64(pos, &["x"], 0.0), read_f64(pos, &["y"], 0.0));
    }
    Position::new(read_f64(map, &["x"], 0.0), read_f64(map, &["y"], 0.0))
}

/// Read localized text from either a language->string map or a single
/// string duplicated across the default and fallback languages.
pub fn read_localized(
    map: &Map<String, Value>,
    keys: &[&str],
    default_language: &str,
    fallback_language: &str,
) -> LocalizedText {
    match first_present(map, keys) {
        Some(Value::Object(translations)) => {
            let mut text = LocalizedText::new();
            for (lang, value) in translations {
                if let Some(s) = as_string(value) {
                    text.insert(lang.clone(), s);
                }
            }
            text
        }
        Some(value) => as_string(value).map_or_else(LocalizedText::new, |s| {
            LocalizedText::from_single(&s, &[default_language, fallback_language])
        }),
        None => LocalizedText::new(),
    }
}

/// Read a requirements list from either a JSON array of ids or an
/// object whose keys are ids. Unreadable entries are skipped.
pub fn read_requirements(map: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    match first_present(map, keys) {
        Some(Value::Array(items)) => items.iter().filter_map(as_string).collect(),
        Some(Value::Object(entries)) => entries.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("test value is an object")
    }

    #[test]
    fn test_key_precedence_order() {
        let map = obj(json!({"contentId": "first", "content_id": "second"}));
        assert_eq!(
            read_string(&map, &["contentId", "content_id"]),
            Some("first".to_string())
        );
        assert_eq!(
            read_string(&map, &["content_id", "contentId"]),
            Some("second".to_string())
        );
    }

    #[test]
    fn test_number_stored_as_string() {
        let map = obj(json!({"difficulty": "3", "time": "  7.9 "}));
        assert_eq!(read_u32(&map, &["difficulty"], 1), 3);
        assert_eq!(read_u32(&map, &["time"], 0), 7);
    }

    #[test]
    fn test_u32_rejects_negatives_and_junk() {
        let map = obj(json!({"a": -5, "b": "soon", "c": true}));
        assert_eq!(read_u32(&map, &["a"], 1), 1);
        assert_eq!(read_u32(&map, &["b"], 1), 1);
        assert_eq!(read_u32(&map, &["c"], 1), 1);
        assert_eq!(read_u32(&map, &["missing"], 9), 9);
    }

    #[test]
    fn test_position_nested_object() {
        let map = obj(json!({"position": {"x": 10, "y": "20.5"}}));
        let pos = read_position(&map);
        assert!((pos.x - 10.0).abs() < f64::EPSILON);
        assert!((pos.y - 20.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_position_flat_siblings() {
        let map = obj(json!({"x": 3.5, "y": 4}));
        let pos = read_position(&map);
        assert!((pos.x - 3.5).abs() < f64::EPSILON);
        assert!((pos.y - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_position_malformed_defaults_to_origin() {
        let map = obj(json!({"position": {"x": "over there", "y": null}}));
        let pos = read_position(&map);
        assert!(pos.x.abs() < f64::EPSILON);
        assert!(pos.y.abs() < f64::EPSILON);
    }

    #[test]
    fn test_localized_from_map() {
        let map = obj(json!({"title": {"ru": "Графы", "en": "Graphs"}}));
        let text = read_localized(&map, &["title"], "ru", "en");
        assert_eq!(text.get("ru", "en"), Some("Графы"));
        assert_eq!(text.get("en", "ru"), Some("Graphs"));
    }

    #[test]
    fn test_localized_from_single_string() {
        let map = obj(json!({"title": "Graphs"}));
        let text = read_localized(&map, &["title"], "ru", "en");
        assert_eq!(text.values.len(), 2);
        assert_eq!(text.get("ru", "en"), Some("Graphs"));
    }

    #[test]
    fn test_requirements_from_array() {
        let map = obj(json!({"requirements": ["a", "b", 3]}));
        assert_eq!(
            read_requirements(&map, &["requirements"]),
            vec!["a".to_string(), "b".to_string(), "3".to_string()]
        );
    }

    #[test]
    fn test_requirements_from_object_keys() {
        let map = obj(json!({"requirements": {"a": true, "b": {}}}));
        assert_eq!(
            read_requirements(&map, &["requirements"]),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_requirements_malformed_is_empty() {
        let map = obj(json!({"requirements": "a,b"}));
        assert!(read_requirements(&map, &["requirements"]).is_empty());
    }
}
