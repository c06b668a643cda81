use std::io::ErrorKind;
use std::path::Path;
use staymatch_core::Error;

/// Map schema loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_schema_load_error(error: &Error, path: &Path) -> (String, String, String) {
    match error {
        Error::SchemaDocument(problems) => (
            "Schema Error".to_string(),
            "The schema document does not have the expected structure.".to_string(),
            problems.join("\n"),
        ),
        Error::KindConflict { .. }
        | Error::InvalidKey { .. }
        | Error::DuplicateCategory(_)
        | Error::DuplicateSharedGroup(_) => (
            "Schema Error".to_string(),
            "The schema document defines conflicting attributes.".to_string(),
            error.to_string(),
        ),
        other => map_file_error(other, path, "schema document"),
    }
}

/// Map listing file loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_listings_load_error(error: &Error, path: &Path) -> (String, String, String) {
    map_file_error(error, path, "listings file")
}

/// Map values file loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_values_load_error(error: &Error, path: &Path) -> (String, String, String) {
    map_file_error(error, path, "values file")
}

fn map_file_error(error: &Error, path: &Path, what: &str) -> (String, String, String) {
    match error {
        Error::Io(io) if io.kind() == ErrorKind::NotFound => (
            "File Not Found".to_string(),
            format!("The {} could not be found.", what),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                path.display()
            ),
        ),
        Error::Io(io) if io.kind() == ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to read this file:\n{}", path.display()),
        ),
        Error::Json(json) => (
            "Invalid JSON".to_string(),
            format!("The {} is not valid JSON.", what),
            format!("{} ({})", json, path.display()),
        ),
        other => (
            "Error Loading File".to_string(),
            format!("Failed to load {}.", what),
            other.to_string(),
        ),
    }
}
