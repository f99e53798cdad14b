//! Readers for raw JSON payload fields
//!
//! Payload fields arrive as untyped JSON so a wrong type can be reported
//! against the field that carries it.

use serde_json::Value;
use shared::error::{AppError, AppResult};

/// A present, non-blank text field
pub fn required_text<'a>(field: &str, value: Option<&'a Value>) -> AppResult<&'a str> {
    optional_text(field, value)?.ok_or_else(|| AppError::required_field(field))
}

/// A text field where null and blank both mean absent
pub fn optional_text<'a>(field: &str, value: Option<&'a Value>) -> AppResult<Option<&'a str>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            Ok((!s.is_empty()).then_some(s))
        }
        Some(_) => Err(AppError::invalid_field(
            field,
            format!("'{field}' field must be text"),
        )),
    }
}

/// A row id, given either as a JSON integer or as a numeric string
///
/// Route parameters reach clients as strings, so `"7"` is as good as `7`.
pub fn optional_id(field: &str, value: Option<&Value>) -> AppResult<Option<i64>> {
    let not_a_number = || AppError::invalid_field(field, format!("'{field}' field must be a number"));
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(not_a_number),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| not_a_number()),
        Some(_) => Err(not_a_number()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_fields() {
        let name = json!("  Rick ");
        assert_eq!(required_text("first_name", Some(&name)).unwrap(), "Rick");
        assert_eq!(optional_text("status", Some(&json!("   "))).unwrap(), None);
        assert_eq!(
            required_text("first_name", Some(&Value::Null)).unwrap_err().message,
            "Field required: 'first_name'"
        );

        let err = required_text("first_name", Some(&json!(42))).unwrap_err();
        assert_eq!(err.message, "'first_name' field must be text");
        assert_eq!(err.field(), Some("first_name"));
    }

    #[test]
    fn test_ids() {
        assert_eq!(optional_id("reservation_id", Some(&json!(7))).unwrap(), Some(7));
        assert_eq!(optional_id("reservation_id", Some(&json!(" 7 "))).unwrap(), Some(7));
        assert_eq!(optional_id("reservation_id", Some(&json!(""))).unwrap(), None);
        assert_eq!(optional_id("reservation_id", None).unwrap(), None);

        for bad in [json!("seven"), json!(7.5), json!(true), json!([7])] {
            let err = optional_id("reservation_id", Some(&bad)).unwrap_err();
            assert_eq!(err.message, "'reservation_id' field must be a number", "{bad}");
        }
    }
}
