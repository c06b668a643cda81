use crate::models::{AttributeDefinition, AttributeKind, AttributeValue, AttributeValues};
use crate::schema::EffectiveAttribute;
use std::collections::BTreeMap;

/// Validation failure for one attribute, with a user-facing message
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Accumulated failures, keyed by attribute key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn insert(&mut self, error: ValidationError) {
        self.0.insert(error.key, error.message);
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }
}

/// Validate one value against one attribute definition.
///
/// Checks run in order and stop at the first failure: required, numeric
/// parse, minimum, maximum. Select values are not checked against their
/// options, so legacy values outside the option list still pass.
pub fn validate(def: &AttributeDefinition, value: Option<&AttributeValue>) -> Option<ValidationError> {
    let rules = def.validation.clone().unwrap_or_default();
    let present = value.filter(|v| !v.is_blank());

    let fail = |message: String| {
        Some(ValidationError {
            key: def.key.clone(),
            message,
        })
    };
    let custom_or = |default: String| rules.error_message.clone().unwrap_or(default);

    let Some(value) = present else {
        if rules.required {
            return fail(custom_or(format!("{} is required", def.label)));
        }
        return None;
    };

    if def.kind != AttributeKind::Number {
        return None;
    }

    let Some(number) = value.as_number() else {
        return fail(format!("{} must be a valid number", def.label));
    };

    if let Some(min) = rules.min {
        if number < min {
            return fail(custom_or(format!("{} must be at least {}", def.label, min)));
        }
    }

    if let Some(max) = rules.max {
        if number > max {
            return fail(custom_or(format!("{} must be at most {}", def.label, max)));
        }
    }

    None
}

/// Validate every attribute of a form, collecting failures instead of stopping
pub fn validate_values(attributes: &[EffectiveAttribute], values: &AttributeValues) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    for effective in attributes {
        if let Some(error) = validate(&effective.attribute, values.get(effective.key())) {
            errors.insert(error);
        }
    }

    errors
}
