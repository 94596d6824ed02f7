//! Required-field extraction for loosely typed JSON submissions.
//!
//! A field counts as present when its JSON value is truthy: a non-empty
//! string, a non-zero number, `true`, or a non-empty array or object.
//! Present values are stored as text; strings are kept verbatim and
//! everything else is stored as compact JSON.

use serde_json::{Map, Value};

/// One or more required fields were absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required fields")]
pub struct MissingFields {
    pub fields: Vec<&'static str>,
}

/// Whether a JSON value counts as a provided field.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Text form of a provided field, `None` when the field is missing or falsy.
pub fn field_text(value: Option<&Value>) -> Option<String> {
    let value = value.filter(|v| is_truthy(v))?;
    match value {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Extract all `names` from `body` as text, in order.
pub fn extract_required<const N: usize>(
    body: &Map<String, Value>,
    names: &[&'static str; N],
) -> Result<[String; N], MissingFields> {
    let missing: Vec<&'static str> = names
        .iter()
        .copied()
        .filter(|name| field_text(body.get(*name)).is_none())
        .collect();

    if !missing.is_empty() {
        return Err(MissingFields { fields: missing });
    }

    Ok(names.map(|name| field_text(body.get(name)).unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!("a")));
        assert!(is_truthy(&json!(0.8)));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(["E"])));
    }

    #[test]
    fn test_field_text_forms() {
        assert_eq!(field_text(Some(&json!("Ana"))), Some("Ana".to_string()));
        assert_eq!(field_text(Some(&json!(0.8))), Some("0.8".to_string()));
        assert_eq!(
            field_text(Some(&json!(["E", "F"]))),
            Some(r#"["E","F"]"#.to_string())
        );
        assert_eq!(field_text(Some(&json!(""))), None);
        assert_eq!(field_text(None), None);
    }

    #[test]
    fn test_extract_required_in_order() {
        let body = object(json!({"b": "2", "a": "1", "extra": "x"}));
        let [a, b] = extract_required(&body, &["a", "b"]).unwrap();
        assert_eq!(a, "1");
        assert_eq!(b, "2");
    }

    #[test]
    fn test_extract_required_reports_missing() {
        let body = object(json!({"a": "1", "b": ""}));
        let err = extract_required(&body, &["a", "b", "c"]).unwrap_err();
        assert_eq!(err.fields, vec!["b", "c"]);
        assert_eq!(err.to_string(), "Missing required fields");
    }
}
