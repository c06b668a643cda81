use anyhow::anyhow;
use std::path::PathBuf;
use staymatch_core::{load_schema, SchemaRegistry};
use tracing::debug;

use crate::errors::map_schema_load_error;

/// Application state shared by every command
#[derive(Debug)]
pub struct AppState {
    /// Schema registry in use
    pub registry: SchemaRegistry,
    /// Schema document the registry was loaded from, `None` for the built-in catalog
    pub schema_file: Option<PathBuf>,
}

impl AppState {
    /// Load the registry from a schema document, or the built-in catalog
    pub fn load(schema_file: Option<PathBuf>) -> anyhow::Result<Self> {
        let registry = match &schema_file {
            Some(path) => load_schema(path).map_err(|e| {
                let (title, message, details) = map_schema_load_error(&e, path);
                anyhow!("{}: {}\n{}", title, message, details)
            })?,
            None => SchemaRegistry::builtin()?,
        };

        debug!(
            schema = %schema_name(&schema_file),
            categories = registry.category_names().len(),
            "schema loaded"
        );

        Ok(Self {
            registry,
            schema_file,
        })
    }

    /// Name of the schema source for headings and logs
    pub fn schema_name(&self) -> String {
        schema_name(&self.schema_file)
    }
}

fn schema_name(schema_file: &Option<PathBuf>) -> String {
    schema_file
        .as_ref()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("built-in catalog")
        .to_string()
}
