//! Structural validation of call arguments against a tool's declared fields.
//!
//! Knows nothing about screen geometry or OS state; coordinates that are
//! numbers pass here and are range-checked later by the handlers.

use serde_json::{Map, Value};

use super::catalog::{FieldSpec, FieldType, ToolDescriptor};
use crate::error::ToolError;

/// Check `arguments` against the descriptor and return them with defaults
/// filled in. Absent or `null` arguments count as `{}`. Undeclared fields are
/// left alone.
pub fn validate(
    descriptor: &ToolDescriptor,
    arguments: &Value,
) -> Result<Map<String, Value>, ToolError> {
    let mut args = match arguments {
        Value::Null => Map::new(),
        Value::Object(map) => map.clone(),
        other => {
            return Err(ToolError::invalid(
                "arguments",
                format!("expected an object, got {}", type_name(other)),
            ))
        }
    };

    for field in &descriptor.fields {
        match args.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    return Err(ToolError::MissingArgument {
                        field: field.name.to_string(),
                    });
                }
                match &field.default {
                    Some(default) => {
                        args.insert(field.name.to_string(), default.clone());
                    }
                    None => {
                        args.remove(field.name);
                    }
                }
            }
            Some(value) => check_field(field, value)?,
        }
    }

    Ok(args)
}

fn check_field(field: &FieldSpec, value: &Value) -> Result<(), ToolError> {
    match field.ty {
        FieldType::Number => expect(field, value, value.is_number(), "a number"),
        FieldType::Boolean => expect(field, value, value.is_boolean(), "a boolean"),
        FieldType::String => {
            let Some(s) = value.as_str() else {
                return expect(field, value, false, "a string");
            };
            if field.non_empty && s.is_empty() {
                return Err(ToolError::invalid(field.name, "must be a non-empty string"));
            }
            check_allowed(field, s)
        }
        FieldType::StringList => {
            let Some(items) = value.as_array() else {
                return expect(field, value, false, "an array of strings");
            };
            for item in items {
                let Some(s) = item.as_str() else {
                    return Err(ToolError::invalid(
                        field.name,
                        format!("items must be strings, got {}", type_name(item)),
                    ));
                };
                check_allowed(field, s)?;
            }
            Ok(())
        }
        FieldType::PointList => {
            let Some(items) = value.as_array() else {
                return expect(field, value, false, "an array of {x, y} points");
            };
            for (i, item) in items.iter().enumerate() {
                let is_point = item
                    .as_object()
                    .map(|p| {
                        p.get("x").is_some_and(Value::is_number)
                            && p.get("y").is_some_and(Value::is_number)
                    })
                    .unwrap_or(false);
                if !is_point {
                    return Err(ToolError::invalid(
                        field.name,
                        format!("item {i} must be an object with numeric x and y"),
                    ));
                }
            }
            Ok(())
        }
    }
}

fn expect(field: &FieldSpec, value: &Value, ok: bool, wanted: &str) -> Result<(), ToolError> {
    if ok {
        return Ok(());
    }
    Err(ToolError::invalid(
        field.name,
        format!("expected {wanted}, got {}", type_name(value)),
    ))
}

fn check_allowed(field: &FieldSpec, value: &str) -> Result<(), ToolError> {
    match field.allowed {
        Some(allowed) if !allowed.contains(&value) => Err(ToolError::invalid(
            field.name,
            format!("{value:?} is not one of: {}", allowed.join(", ")),
        )),
        _ => Ok(()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tools::catalog::{Catalog, ToolKind};

    fn check(kind: ToolKind, args: Value) -> Result<Map<String, Value>, ToolError> {
        let catalog = Catalog::new();
        validate(catalog.get(kind), &args)
    }

    #[test]
    fn defaults_fill_absent_optional_fields() {
        let args = check(ToolKind::MouseClick, json!({})).unwrap();
        assert_eq!(args["button"], "left");
        assert_eq!(args["double"], false);

        let args = check(ToolKind::MouseDragDrop, json!({"fromX": 1, "fromY": 2, "toX": 3, "toY": 4})).unwrap();
        assert_eq!(args["duration"], 500);
    }

    #[test]
    fn null_and_missing_arguments_are_empty_objects() {
        assert!(check(ToolKind::ClipboardGet, Value::Null).is_ok());
        let args = check(ToolKind::MouseScroll, json!({"direction": "down", "amount": null})).unwrap();
        assert_eq!(args["amount"], 5);
    }

    #[test]
    fn explicit_values_are_kept() {
        let args = check(ToolKind::MouseClick, json!({"button": "right", "double": true})).unwrap();
        assert_eq!(args["button"], "right");
        assert_eq!(args["double"], true);
    }

    #[test]
    fn missing_required_field_is_named() {
        let err = check(ToolKind::MouseMove, json!({"x": 10})).unwrap_err();
        match err {
            ToolError::MissingArgument { field } => assert_eq!(field, "y"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn enum_violation_names_field_and_allowed_set() {
        let err = check(ToolKind::MouseScroll, json!({"direction": "sideways"})).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
        assert!(msg.contains("direction"));
        assert!(msg.contains("up, down, left, right"));
    }

    #[test]
    fn list_item_enum_is_checked() {
        let err = check(ToolKind::KeyboardPress, json!({"key": "c", "modifiers": ["hyper"]})).unwrap_err();
        assert!(err.to_string().contains("modifiers"));
        assert!(check(ToolKind::KeyboardPress, json!({"key": "c", "modifiers": ["command", "shift"]})).is_ok());
    }

    #[test]
    fn wrong_types_are_rejected() {
        let err = check(ToolKind::ClipboardSet, json!({"text": 42})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { ref field, .. } if field == "text"));

        assert!(check(ToolKind::MouseMove, json!({"x": "10", "y": 5})).is_err());
        assert!(check(ToolKind::MouseClick, json!({"double": "yes"})).is_err());
        assert!(check(ToolKind::MouseMovePath, json!({"points": "0,0"})).is_err());
    }

    #[test]
    fn empty_strings_fail_non_empty_fields() {
        assert!(check(ToolKind::KeyboardType, json!({"text": ""})).is_err());
        assert!(check(ToolKind::WindowFocus, json!({"appName": ""})).is_err());
        // clipboard text may legitimately be empty
        assert!(check(ToolKind::ClipboardSet, json!({"text": ""})).is_ok());
    }

    #[test]
    fn malformed_points_are_rejected() {
        let err = check(ToolKind::MouseMovePath, json!({"points": [{"x": 1, "y": 2}, {"x": 3}]})).unwrap_err();
        assert!(err.to_string().contains("item 1"));
    }

    #[test]
    fn short_point_lists_pass_structural_validation() {
        // path length is the synthesizer's concern
        assert!(check(ToolKind::MouseMovePath, json!({"points": [{"x": 1, "y": 2}]})).is_ok());
    }

    #[test]
    fn non_object_arguments_are_rejected() {
        let err = check(ToolKind::MouseMove, json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("expected an object"));
    }

    #[test]
    fn undeclared_fields_are_ignored() {
        let args = check(ToolKind::GetScreenSize, json!({"verbose": true})).unwrap();
        assert_eq!(args["verbose"], true);
    }
}
