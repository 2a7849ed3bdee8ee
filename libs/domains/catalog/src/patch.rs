//! Field-level partial updates over an entity's editable view.
//!
//! A patch document is a list of [`PatchOp`]s, each addressing one top-level
//! field by `/field` path. Operations are applied strictly in input order to
//! a JSON projection of the editable view; the result is deserialized back
//! into the view type and must then pass the same validation rules used for
//! full updates before anything is merged onto the persisted entity.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use utoipa::ToSchema;

/// One field-level patch instruction.
///
/// ```json
/// [
///   { "op": "replace", "path": "/stock", "value": 500 },
///   { "op": "remove", "path": "/description" }
/// ]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    /// Replace the addressed field's value
    Replace { path: String, value: Value },
    /// Set the addressed field's value (the editable view is a closed shape,
    /// so this behaves like replace and never introduces new members)
    Add { path: String, value: Value },
    /// Clear the addressed field; required-field rules fire during the
    /// validation step that follows
    Remove { path: String },
}

impl PatchOp {
    fn path(&self) -> &str {
        match self {
            PatchOp::Replace { path, .. } | PatchOp::Add { path, .. } | PatchOp::Remove { path } => {
                path
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("patch path '{0}' must reference a top-level field like '/name'")]
    InvalidPath(String),

    #[error("patch path '{0}' does not match any editable field")]
    UnknownField(String),

    #[error("patch target must serialize to a JSON object")]
    NotAnObject,

    #[error("patched document no longer matches the editable shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Apply `operations` to the editable view, strictly in input order.
///
/// Returns the patched view; the input is never mutated, so a failing
/// operation leaves no trace. Validation is the caller's next step.
pub fn apply_patch<T>(view: &T, operations: &[PatchOp]) -> Result<T, PatchError>
where
    T: Serialize + DeserializeOwned,
{
    let mut doc = match serde_json::to_value(view)? {
        Value::Object(map) => map,
        _ => return Err(PatchError::NotAnObject),
    };

    for op in operations {
        apply_one(&mut doc, op)?;
    }

    Ok(serde_json::from_value(Value::Object(doc))?)
}

fn apply_one(doc: &mut Map<String, Value>, op: &PatchOp) -> Result<(), PatchError> {
    let field = field_of(op.path())?;
    let slot = doc
        .get_mut(field)
        .ok_or_else(|| PatchError::UnknownField(op.path().to_string()))?;

    *slot = match op {
        PatchOp::Replace { value, .. } | PatchOp::Add { value, .. } => value.clone(),
        PatchOp::Remove { .. } => Value::Null,
    };

    Ok(())
}

fn field_of(path: &str) -> Result<&str, PatchError> {
    let field = path
        .strip_prefix('/')
        .ok_or_else(|| PatchError::InvalidPath(path.to_string()))?;

    if field.is_empty() || field.contains('/') {
        return Err(PatchError::InvalidPath(path.to_string()));
    }

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UpdateProduct;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn view() -> UpdateProduct {
        UpdateProduct {
            name: Some("Widget".to_string()),
            description: Some("A widget".to_string()),
            price: Some(Decimal::new(1999, 2)),
            stock: Some(10),
            category_id: Some(Uuid::now_v7()),
        }
    }

    #[test]
    fn test_replace_one_field_leaves_others_unchanged() {
        let original = view();
        let ops = vec![PatchOp::Replace {
            path: "/stock".to_string(),
            value: serde_json::json!(500),
        }];

        let patched = apply_patch(&original, &ops).unwrap();

        assert_eq!(patched.stock, Some(500));
        assert_eq!(patched.name, original.name);
        assert_eq!(patched.price, original.price);
        assert_eq!(patched.category_id, original.category_id);
    }

    #[test]
    fn test_remove_clears_the_field() {
        let ops = vec![PatchOp::Remove {
            path: "/description".to_string(),
        }];

        let patched = apply_patch(&view(), &ops).unwrap();
        assert_eq!(patched.description, None);
    }

    #[test]
    fn test_operations_apply_in_input_order() {
        let ops = vec![
            PatchOp::Replace {
                path: "/stock".to_string(),
                value: serde_json::json!(500),
            },
            PatchOp::Replace {
                path: "/stock".to_string(),
                value: serde_json::json!(7),
            },
        ];

        let patched = apply_patch(&view(), &ops).unwrap();
        assert_eq!(patched.stock, Some(7));
    }

    #[test]
    fn test_add_sets_a_known_field() {
        let mut original = view();
        original.description = None;

        let ops = vec![PatchOp::Add {
            path: "/description".to_string(),
            value: serde_json::json!("now described"),
        }];

        let patched = apply_patch(&original, &ops).unwrap();
        assert_eq!(patched.description, Some("now described".to_string()));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let ops = vec![PatchOp::Replace {
            path: "/no_such_field".to_string(),
            value: serde_json::json!(1),
        }];

        let err = apply_patch(&view(), &ops).unwrap_err();
        assert!(matches!(err, PatchError::UnknownField(_)));
    }

    #[test]
    fn test_nested_and_bare_paths_are_rejected() {
        for path in ["stock", "/a/b", "/", ""] {
            let ops = vec![PatchOp::Remove {
                path: path.to_string(),
            }];
            let err = apply_patch(&view(), &ops).unwrap_err();
            assert!(
                matches!(err, PatchError::InvalidPath(_)),
                "path {:?} should be invalid",
                path
            );
        }
    }

    #[test]
    fn test_type_mismatch_is_a_shape_error() {
        let ops = vec![PatchOp::Replace {
            path: "/stock".to_string(),
            value: serde_json::json!("not a number"),
        }];

        let err = apply_patch(&view(), &ops).unwrap_err();
        assert!(matches!(err, PatchError::Shape(_)));
    }

    #[test]
    fn test_patch_document_wire_format() {
        let ops: Vec<PatchOp> = serde_json::from_value(serde_json::json!([
            { "op": "replace", "path": "/stock", "value": 500 },
            { "op": "remove", "path": "/description" }
        ]))
        .unwrap();

        assert_eq!(ops.len(), 2);
        let patched = apply_patch(&view(), &ops).unwrap();
        assert_eq!(patched.stock, Some(500));
        assert_eq!(patched.description, None);
    }
}
