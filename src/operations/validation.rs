use staymatch_core::{coerce_value, parse_flag, AttributeKind, AttributeValue, SchemaRegistry};

/// Input error with field and message
#[derive(Debug)]
pub struct InputError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for InputError {}

/// Split a "key=value" assignment
pub fn parse_assignment(input: &str) -> Result<(String, String), InputError> {
    let Some((key, value)) = input.split_once('=') else {
        return Err(InputError {
            field: input.to_string(),
            message: "Expected key=value".to_string(),
        });
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(InputError {
            field: input.to_string(),
            message: "Attribute key cannot be empty".to_string(),
        });
    }

    Ok((key.to_string(), value.trim().to_string()))
}

/// Parse --set assignments into typed values using each key's declared kind.
/// Unlike search filters, flags that cannot be read are rejected.
pub fn parse_assignments(
    registry: &SchemaRegistry,
    inputs: &[String],
) -> Result<Vec<(String, AttributeValue)>, InputError> {
    let mut assignments = Vec::new();

    for input in inputs {
        let (key, raw) = parse_assignment(input)?;
        let kind = registry.definition(&key).map(|d| &d.kind);

        if matches!(kind, Some(AttributeKind::Boolean)) && parse_flag(&raw).is_none() {
            return Err(InputError {
                field: key,
                message: format!("'{}' is not a yes/no value", raw),
            });
        }

        let value = coerce_value(kind, &raw);
        assignments.push((key, value));
    }

    Ok(assignments)
}
