use crate::error::Result;
use crate::models::{AttributeValues, Listing};
use crate::schema::SchemaRegistry;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load and build a schema registry from a JSON schema document
pub fn load_schema<P: AsRef<Path>>(path: P) -> Result<SchemaRegistry> {
    let contents = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&contents)?;
    SchemaRegistry::from_json(document)
}

/// Load a JSON array of listings as delivered by the listing source
pub fn load_listings<P: AsRef<Path>>(path: P) -> Result<Vec<Listing>> {
    let contents = fs::read_to_string(path)?;
    let listings: Vec<Listing> = serde_json::from_str(&contents)?;
    Ok(listings)
}

/// Load a listing's attribute values from a JSON object
pub fn load_values<P: AsRef<Path>>(path: P) -> Result<AttributeValues> {
    let contents = fs::read_to_string(path)?;
    let values: AttributeValues = serde_json::from_str(&contents)?;
    Ok(values)
}

/// Save attribute values to a JSON file with pretty printing
pub fn save_values<P: AsRef<Path>>(values: &AttributeValues, path: P) -> Result<()> {
    let json = serde_json::to_string_pretty(values)?;
    fs::write(path, json)?;
    Ok(())
}
