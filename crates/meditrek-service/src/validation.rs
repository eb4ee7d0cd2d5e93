//! `validator` glue shared by the request types, the services and the HTTP layer.
//!
//! Request structs derive [`validator::Validate`] and point their `custom`
//! rules at the functions below. Failures are flattened into one
//! validation error whose details map camelCase field names to messages.

use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

use meditrek_core::error::AppError;
use meditrek_entity::alert::{AlertPriority, AlertType};
use meditrek_entity::diagnostic::TestStatus;

/// Convert `validator` output into a validation error with per-field details.
///
/// The top-level message is the first message of the alphabetically first
/// field.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut details = Map::new();
    let mut first = None;

    for (field, field_errors) in fields {
        let messages: Vec<Value> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .clone()
                    .unwrap_or_else(|| Cow::Owned(format!("Invalid value for {field}")))
                    .into_owned()
            })
            .inspect(|m| {
                first.get_or_insert_with(|| m.clone());
            })
            .map(Value::String)
            .collect();
        details.insert(camel_case(&field), Value::Array(messages));
    }

    AppError::validation(first.unwrap_or_else(|| "Validation failed".to_string()))
        .with_details(Value::Object(details))
}

/// `Ok(())` when nothing was recorded.
pub fn check(errors: ValidationErrors) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(validation_error(errors))
    }
}

/// An error with a fixed message, for checks made outside a derive.
pub fn invalid(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Rejects empty and whitespace-only text.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

pub fn alert_type(value: &str) -> Result<(), ValidationError> {
    one_of::<AlertType>(value)
}

pub fn alert_priority(value: &str) -> Result<(), ValidationError> {
    one_of::<AlertPriority>(value)
}

pub fn test_status(value: &str) -> Result<(), ValidationError> {
    one_of::<TestStatus>(value)
}

/// Accepts the values `T` parses, reusing its "must be one of" message.
fn one_of<T>(value: &str) -> Result<(), ValidationError>
where
    T: FromStr<Err = AppError>,
{
    value
        .parse::<T>()
        .map(drop)
        .map_err(|err| invalid("one_of", err.message))
}

/// `deserialize_with` helper that strips surrounding whitespace.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

/// [`trimmed`] for optional fields. Pair it with `#[serde(default)]`.
pub fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(|s| s.trim().to_string()))
}

/// `notification_threshold` -> `notificationThreshold`, `r#type` -> `type`.
fn camel_case(field: &str) -> String {
    let field = field.strip_prefix("r#").unwrap_or(field);
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
