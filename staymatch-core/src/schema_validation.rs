use serde_json::Value;

const DOCUMENT_SCHEMA: &str = include_str!("../data/schema-document.schema.json");

/// Validate data against JSON Schema
/// Returns Ok(()) if valid, Err with list of validation errors if invalid
pub fn validate_against_schema(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let compiled = jsonschema::validator_for(schema)
        .map_err(|e| vec![format!("Schema compilation error: {}", e)])?;

    let errors: Vec<String> = compiled
        .iter_errors(data)
        .map(|error| {
            let path_str = error.instance_path.to_string();
            let location = if path_str.is_empty() {
                "root".to_string()
            } else {
                path_str
            };
            format!("{} at {}", error, location)
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check the structure of a category schema document before it is deserialized
pub fn validate_schema_document(document: &Value) -> Result<(), Vec<String>> {
    let schema: Value = serde_json::from_str(DOCUMENT_SCHEMA)
        .map_err(|e| vec![format!("Bundled document schema is unreadable: {}", e)])?;
    validate_against_schema(&schema, document)
}
