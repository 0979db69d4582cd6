//! Decoding of backend error payloads.
//!
//! The backend answers failures either with `{"message": ...}` /
//! `{"detail": ...}` or with a validation mapping of field name to one or
//! more messages. Both collapse into a [`NormalizedError`].

use serde::Serialize;
use serde_json::{Map, Value};

/// Message used when a failure carries nothing more specific.
pub const GENERIC_FAILURE: &str = "API request failed";

/// Key the backend uses for errors not tied to a single field.
const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Uniform error surfaced to callers regardless of backend payload shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct NormalizedError {
    pub message: String,
    /// Per-field messages when the payload was a validation mapping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Map<String, Value>>,
}

impl NormalizedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: None,
        }
    }

    pub fn generic() -> Self {
        Self::new(GENERIC_FAILURE)
    }

    pub fn is_generic(&self) -> bool {
        self.message == GENERIC_FAILURE
    }

    /// Joined message for one field, if the field failed validation.
    pub fn field(&self, name: &str) -> Option<String> {
        self.field_errors
            .as_ref()
            .and_then(|fields| fields.get(name))
            .map(field_message)
    }
}

/// Keys carrying a ready-made message, in order of preference.
const HEADLINE_KEYS: [&str; 2] = ["message", "detail"];

/// Build a [`NormalizedError`] from a backend error payload.
///
/// A non-empty `message` wins, then a non-empty `detail`. Otherwise every
/// remaining entry is a field error. Blank `message`/`detail` entries are
/// treated as absent.
pub fn normalize_error(payload: &Value) -> NormalizedError {
    let Some(object) = payload.as_object() else {
        return NormalizedError::generic();
    };

    if let Some(headline) = HEADLINE_KEYS
        .iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
    {
        return NormalizedError::new(headline);
    }

    let fields: Map<String, Value> = object
        .iter()
        .filter(|(key, value)| !(HEADLINE_KEYS.contains(&key.as_str()) && is_blank(value)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    if fields.is_empty() {
        return NormalizedError::generic();
    }

    let message = fields
        .iter()
        .map(|(field, value)| {
            let text = field_message(value);
            if field == NON_FIELD_ERRORS {
                text
            } else {
                format!("{}: {}", field, text)
            }
        })
        .collect::<Vec<_>>()
        .join(" | ");

    NormalizedError {
        message,
        field_errors: Some(fields),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Render one field's value: string as is, arrays joined with ", ".
fn field_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(field_message)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
