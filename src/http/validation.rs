//! Required-field validation for request payloads.
//!
//! Each route that accepts a body owns a [`RequestSchema`]. Validation is a
//! presence check only: an empty string or a value of the wrong type satisfies
//! it. The store decides whether the value is acceptable.

use std::fmt;

use serde_json::{Map, Value};

/// How a required field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The key exists, whatever its value (including null).
    Exists,
    /// The key exists and its value is truthy (not null, false, 0, "" or NaN).
    Truthy,
}

/// Required fields for one route and the message shown when one is missing.
#[derive(Debug, Clone, Copy)]
pub struct RequestSchema {
    pub required: &'static [&'static str],
    pub presence: Presence,
    message: fn(&str) -> String,
}

/// Outcome of a failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields {
    /// Every missing field, in schema order.
    pub fields: Vec<&'static str>,
    message: String,
}

impl MissingFields {
    /// The first missing field, the one named in the message.
    pub fn first(&self) -> &'static str {
        self.fields[0]
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for MissingFields {}

impl RequestSchema {
    pub fn validate(&self, payload: &Map<String, Value>) -> Result<(), MissingFields> {
        let fields: Vec<&'static str> = self
            .required
            .iter()
            .copied()
            .filter(|key| match (self.presence, payload.get(*key)) {
                (_, None) => true,
                (Presence::Exists, Some(_)) => false,
                (Presence::Truthy, Some(value)) => !is_truthy(value),
            })
            .collect();

        match fields.first() {
            None => Ok(()),
            Some(first) => Err(MissingFields {
                message: (self.message)(first),
                fields,
            }),
        }
    }
}

fn project_message(_field: &str) -> String {
    "You are missing a name property for this project".to_string()
}

fn palette_message(field: &str) -> String {
    format!("The expected format is: {{ project_id: <Integer> }}. You are missing the {field} property.")
}

fn recolor_message(field: &str) -> String {
    format!(
        "The expected format is: {{ changeColor: <String>, newColor: <String> }}. You are missing the {field} property."
    )
}

fn delete_message(field: &str) -> String {
    format!("The expected format is: {{ id: <Number> }}. You are missing the {field} property.")
}

pub const PROJECT_CREATE: RequestSchema = RequestSchema {
    required: &["name"],
    presence: Presence::Exists,
    message: project_message,
};

pub const PROJECT_UPDATE: RequestSchema = RequestSchema {
    required: &["name"],
    presence: Presence::Exists,
    message: project_message,
};

pub const PALETTE_CREATE: RequestSchema = RequestSchema {
    required: &["color1", "color2", "color3", "color4", "color5", "project_id"],
    presence: Presence::Exists,
    message: palette_message,
};

pub const PALETTE_RECOLOR: RequestSchema = RequestSchema {
    required: &["changeColor", "newColor"],
    presence: Presence::Exists,
    message: recolor_message,
};

pub const DELETE_BY_ID: RequestSchema = RequestSchema {
    required: &["id"],
    presence: Presence::Truthy,
    message: delete_message,
};

/// JavaScript-style truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Integer prefix of a body id, the way `parseInt` reads it.
///
/// Numbers are truncated; strings yield their leading signed digits
/// (`"12abc"` is 12); anything else has no integer value.
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Path ids are plain decimal integers; anything else matches no row.
pub fn parse_path_id(id: &str) -> Option<i64> {
    id.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_project_requires_name() {
        assert!(PROJECT_CREATE.validate(&object(json!({ "name": "Kitchen" }))).is_ok());

        let err = PROJECT_CREATE.validate(&object(json!({ "title": "Kitchen" }))).unwrap_err();
        assert_eq!(err.fields, vec!["name"]);
        assert_eq!(err.to_string(), "You are missing a name property for this project");
    }

    #[test]
    fn test_presence_ignores_type_and_emptiness() {
        assert!(PROJECT_UPDATE.validate(&object(json!({ "name": "" }))).is_ok());
        assert!(PROJECT_UPDATE.validate(&object(json!({ "name": null }))).is_ok());
        assert!(PROJECT_UPDATE.validate(&object(json!({ "name": 7 }))).is_ok());
    }

    #[test]
    fn test_palette_reports_first_missing_field() {
        let payload = object(json!({
            "color1": "#000000", "color2": "#111111", "color4": "#333333", "name": "Partial",
        }));
        let err = PALETTE_CREATE.validate(&payload).unwrap_err();

        assert_eq!(err.first(), "color3");
        assert_eq!(err.fields, vec!["color3", "color5", "project_id"]);
        assert_eq!(
            err.message(),
            "The expected format is: { project_id: <Integer> }. You are missing the color3 property."
        );
    }

    #[test]
    fn test_palette_name_is_optional() {
        let payload = object(json!({
            "color1": "a", "color2": "b", "color3": "c", "color4": "d", "color5": "e", "project_id": 1,
        }));
        assert!(PALETTE_CREATE.validate(&payload).is_ok());
    }

    #[test]
    fn test_recolor_needs_both_fields() {
        let err = PALETTE_RECOLOR
            .validate(&object(json!({ "changeColor": "color1" })))
            .unwrap_err();
        assert_eq!(
            err.message(),
            "The expected format is: { changeColor: <String>, newColor: <String> }. You are missing the newColor property."
        );
    }

    #[test]
    fn test_delete_requires_truthy_id() {
        for payload in [json!({}), json!({ "id": 0 }), json!({ "id": "" }), json!({ "id": null }), json!({ "id": false })] {
            let err = DELETE_BY_ID.validate(&object(payload)).unwrap_err();
            assert_eq!(
                err.message(),
                "The expected format is: { id: <Number> }. You are missing the id property."
            );
        }
        assert!(DELETE_BY_ID.validate(&object(json!({ "id": 3 }))).is_ok());
        assert!(DELETE_BY_ID.validate(&object(json!({ "id": "3" }))).is_ok());
    }

    #[test]
    fn test_parse_int_follows_prefix_rules() {
        assert_eq!(parse_int(&json!(12)), Some(12));
        assert_eq!(parse_int(&json!(12.9)), Some(12));
        assert_eq!(parse_int(&json!("  42")), Some(42));
        assert_eq!(parse_int(&json!("-7px")), Some(-7));
        assert_eq!(parse_int(&json!("abc")), None);
        assert_eq!(parse_int(&json!(true)), None);
        assert_eq!(parse_int(&json!([1])), None);
    }

    #[test]
    fn test_path_ids() {
        assert_eq!(parse_path_id("-100"), Some(-100));
        assert_eq!(parse_path_id("12abc"), None);
    }
}
