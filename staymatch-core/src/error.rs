use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema document is invalid:\n{}", .0.join("\n"))]
    SchemaDocument(Vec<String>),

    #[error("Invalid attribute key '{key}' in {context}")]
    InvalidKey { key: String, context: String },

    #[error("Category '{0}' is defined more than once")]
    DuplicateCategory(String),

    #[error("Shared group '{0}' is defined more than once")]
    DuplicateSharedGroup(String),

    #[error("Attribute '{key}' is declared as {first} and as {second}")]
    KindConflict {
        key: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("Attribute '{0}' does not belong to any attached category")]
    UnreachableAttribute(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
