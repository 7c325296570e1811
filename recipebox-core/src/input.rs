//! Create/update payloads and the validation gate that produces them.
//!
//! Raw JSON never reaches domain logic: it is checked here against either the
//! full shape ([`CreateRecipeInput`]) or the partial shape ([`RecipePatch`]),
//! and every violated constraint is reported at once. Keys outside the
//! whitelist (`name`, `description`, `ingredients`) are dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full payload for creating a recipe. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRecipeInput {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
}

/// Partial payload for updating a recipe. Absent (or `null`) fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
}

/// The rule a payload field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Constraint {
    /// The payload itself was not a JSON object.
    IsObject,
    /// A required field was missing or `null`.
    IsDefined,
    /// The field was present but not a string.
    IsString,
    /// The field was present but not an array.
    IsArray,
    /// The field was an array containing a non-string element.
    IsStringArray,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub constraint: Constraint,
    pub message: String,
}

impl Violation {
    fn new(field: &str, constraint: Constraint) -> Self {
        let message = match constraint {
            Constraint::IsObject => format!("{field} must be a JSON object"),
            Constraint::IsDefined => format!("{field} should not be null or undefined"),
            Constraint::IsString => format!("{field} must be a string"),
            Constraint::IsArray => format!("{field} must be an array"),
            Constraint::IsStringArray => format!("each value in {field} must be a string"),
        };
        Self {
            field: field.to_owned(),
            constraint,
            message,
        }
    }
}

/// A payload type the validation gate can produce from raw JSON.
pub trait Validate: Sized {
    /// Checks `value` against this shape.
    ///
    /// # Errors
    /// Returns every [`Violation`] found, in field order.
    fn validate(value: &Value) -> Result<Self, Vec<Violation>>;
}

impl Validate for CreateRecipeInput {
    fn validate(value: &Value) -> Result<Self, Vec<Violation>> {
        validate_create(value)
    }
}

impl Validate for RecipePatch {
    fn validate(value: &Value) -> Result<Self, Vec<Violation>> {
        validate_patch(value)
    }
}

/// Validates a create payload: all fields required.
///
/// # Errors
/// Returns all violations if any field is missing or mistyped.
pub fn validate_create(value: &Value) -> Result<CreateRecipeInput, Vec<Violation>> {
    let fields = check_fields(value, true)?;
    match fields {
        RecipePatch {
            name: Some(name),
            description: Some(description),
            ingredients: Some(ingredients),
        } => Ok(CreateRecipeInput {
            name,
            description,
            ingredients,
        }),
        // check_fields reports every missing field when `required` is set.
        _ => Err(vec![Violation::new("payload", Constraint::IsDefined)]),
    }
}

/// Validates an update payload: every field optional, but type-checked when present.
///
/// # Errors
/// Returns all violations if any supplied field is mistyped.
pub fn validate_patch(value: &Value) -> Result<RecipePatch, Vec<Violation>> {
    check_fields(value, false)
}

fn check_fields(value: &Value, required: bool) -> Result<RecipePatch, Vec<Violation>> {
    let Some(object) = value.as_object() else {
        return Err(vec![Violation::new("payload", Constraint::IsObject)]);
    };

    let mut violations = Vec::new();
    let patch = RecipePatch {
        name: string_field(object, "name", required, &mut violations),
        description: string_field(object, "description", required, &mut violations),
        ingredients: string_list_field(object, "ingredients", required, &mut violations),
    };

    if violations.is_empty() {
        Ok(patch)
    } else {
        Err(violations)
    }
}

fn string_field(
    object: &Map<String, Value>,
    key: &str,
    required: bool,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match object.get(key) {
        None | Some(Value::Null) => {
            if required {
                violations.push(Violation::new(key, Constraint::IsDefined));
            }
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(Violation::new(key, Constraint::IsString));
            None
        }
    }
}

fn string_list_field(
    object: &Map<String, Value>,
    key: &str,
    required: bool,
    violations: &mut Vec<Violation>,
) -> Option<Vec<String>> {
    match object.get(key) {
        None | Some(Value::Null) => {
            if required {
                violations.push(Violation::new(key, Constraint::IsDefined));
            }
            None
        }
        Some(Value::Array(items)) => {
            let strings: Option<Vec<String>> = items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect();
            if strings.is_none() {
                violations.push(Violation::new(key, Constraint::IsStringArray));
            }
            strings
        }
        Some(_) => {
            violations.push(Violation::new(key, Constraint::IsArray));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn fields_of(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn create_accepts_complete_payload() {
        let input = match validate_create(&json!({
            "name": "Soup",
            "description": "Hot",
            "ingredients": ["water", "salt"],
        })) {
            Ok(i) => i,
            Err(v) => panic!("unexpected violations: {v:?}"),
        };
        assert_eq!(input.name, "Soup");
        assert_eq!(input.ingredients, vec!["water", "salt"]);
    }

    #[test]
    fn create_missing_name_names_the_field() {
        let violations = match validate_create(&json!({
            "description": "Hot",
            "ingredients": [],
        })) {
            Ok(i) => panic!("expected violations, got {i:?}"),
            Err(v) => v,
        };
        assert_eq!(fields_of(&violations), vec!["name"]);
        assert_eq!(violations[0].constraint, Constraint::IsDefined);
    }

    #[test]
    fn create_reports_every_violation_not_just_the_first() {
        let violations = match validate_create(&json!({
            "name": 7,
            "ingredients": "salt",
        })) {
            Ok(i) => panic!("expected violations, got {i:?}"),
            Err(v) => v,
        };
        assert_eq!(fields_of(&violations), vec!["name", "description", "ingredients"]);
        assert_eq!(violations[0].constraint, Constraint::IsString);
        assert_eq!(violations[1].constraint, Constraint::IsDefined);
        assert_eq!(violations[2].constraint, Constraint::IsArray);
    }

    #[test]
    fn create_rejects_non_string_ingredient() {
        let violations = match validate_create(&json!({
            "name": "Soup",
            "description": "Hot",
            "ingredients": ["water", 3],
        })) {
            Ok(i) => panic!("expected violations, got {i:?}"),
            Err(v) => v,
        };
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].constraint, Constraint::IsStringArray);
        assert_eq!(violations[0].message, "each value in ingredients must be a string");
    }

    #[test]
    fn non_object_payload_is_a_single_violation() {
        for payload in [json!([]), json!("soup"), json!(null), json!(1)] {
            let violations = match validate_patch(&payload) {
                Ok(p) => panic!("expected violations for {payload}, got {p:?}"),
                Err(v) => v,
            };
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].constraint, Constraint::IsObject);
        }
    }

    #[test]
    fn patch_allows_missing_fields_and_treats_null_as_absent() {
        let patch = match validate_patch(&json!({ "description": null })) {
            Ok(p) => p,
            Err(v) => panic!("unexpected violations: {v:?}"),
        };
        assert_eq!(patch, RecipePatch::default());
    }

    #[test]
    fn patch_still_type_checks_supplied_fields() {
        let violations = match validate_patch(&json!({ "name": ["x"], "ingredients": {} })) {
            Ok(p) => panic!("expected violations, got {p:?}"),
            Err(v) => v,
        };
        assert_eq!(fields_of(&violations), vec!["name", "ingredients"]);
    }

    #[test]
    fn author_and_unknown_keys_are_stripped() {
        let patch = match validate_patch(&json!({
            "name": "Stew",
            "author": "64b7f0c2a1d3e4f5a6b7c8d9",
            "id": "000000000000000000000000",
            "rating": 5,
        })) {
            Ok(p) => p,
            Err(v) => panic!("unexpected violations: {v:?}"),
        };
        assert_eq!(
            patch,
            RecipePatch {
                name: Some("Stew".to_owned()),
                ..RecipePatch::default()
            }
        );
    }

    #[test]
    fn constraint_serializes_in_camel_case() {
        let json = match serde_json::to_string(&Constraint::IsStringArray) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, "\"isStringArray\"");
    }

    proptest! {
        #[test]
        fn well_typed_payloads_always_validate(
            name in ".*",
            description in ".*",
            ingredients in proptest::collection::vec(".*", 0..8),
        ) {
            let value = json!({
                "name": name,
                "description": description,
                "ingredients": ingredients,
            });
            let input = validate_create(&value).map_err(|v| TestCaseError::fail(format!("{v:?}")))?;
            prop_assert_eq!(input.name, name);
            prop_assert_eq!(input.description, description);
            prop_assert_eq!(input.ingredients, ingredients);
        }

        #[test]
        fn numeric_name_is_always_rejected(n in any::<i64>()) {
            let value = json!({ "name": n });
            let violations = match validate_patch(&value) {
                Ok(p) => return Err(TestCaseError::fail(format!("accepted {p:?}"))),
                Err(v) => v,
            };
            prop_assert_eq!(violations.len(), 1);
            prop_assert_eq!(violations[0].constraint, Constraint::IsString);
        }
    }
}
