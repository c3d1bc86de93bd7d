//! Required-field check applied by the timeline consumer.
//!
//! The consumer rejects a document unless `arrows`, `rows`, `id` and
//! `totalLength` are all present and truthy. A `totalLength` of `0`
//! therefore fails the check even though it is a valid length.

use crate::utils::config::REQUIRED_MODEL_FIELDS;
use crate::utils::error::SchemaError;
use serde_json::Value;

/// Check a model document the way the timeline consumer does
///
/// # Errors
/// * `SchemaError::NotAnObject` - the document is not a JSON object
/// * `SchemaError::MissingField` - a required field is absent, null, or `totalLength` is 0
/// * `SchemaError::InvalidField` - a field is present with the wrong type
pub fn validate_model_document(document: &Value) -> Result<(), SchemaError> {
    let obj = document.as_object().ok_or(SchemaError::NotAnObject)?;

    for field in REQUIRED_MODEL_FIELDS {
        match obj.get(*field) {
            None | Some(Value::Null) => return Err(SchemaError::MissingField(field.to_string())),
            Some(value) => check_field(field, value)?,
        }
    }

    Ok(())
}

fn check_field(field: &str, value: &Value) -> Result<(), SchemaError> {
    let invalid = |reason: &str| SchemaError::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    match field {
        "arrows" | "rows" if !value.is_array() => Err(invalid("expected an array")),
        "id" => match value.as_str() {
            Some("") => Err(SchemaError::MissingField(field.to_string())),
            Some(_) => Ok(()),
            None => Err(invalid("expected a string")),
        },
        "totalLength" => match value.as_f64() {
            Some(length) if length == 0.0 => Err(SchemaError::MissingField(field.to_string())),
            Some(length) if length < 0.0 => Err(invalid("must not be negative")),
            Some(_) => Ok(()),
            None => Err(invalid("expected a number")),
        },
        _ => Ok(()),
    }
}
