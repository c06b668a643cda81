// Public modules
pub mod editor;
pub mod error;
pub mod filtering;
pub mod io;
pub mod models;
pub mod schema;
pub mod schema_validation;
pub mod search;
pub mod sorting;
pub mod validation;

// Re-export commonly used types for convenience
pub use editor::{reduce, EditAction, EditorState, ListingAttributeEditor};
pub use error::{Error, Result};
pub use filtering::{
    classify, coerce_value, has_attribute_filters, is_inert, matches, parse_attribute_filters,
    parse_flag, Classification,
};
pub use io::{load_listings, load_schema, load_values, save_values};
pub use models::{
    AttributeDefinition, AttributeFilters, AttributeGroup, AttributeKind, AttributeValue,
    AttributeValues, CategoryDefinition, Listing, SchemaDocument, SearchFilterRequest,
    SharedAttributeGroup, StructuralFilters, ValidationRules,
};
pub use schema::{EffectiveAttribute, SchemaRegistry};
pub use schema_validation::{validate_against_schema, validate_schema_document};
pub use search::{search, SearchResults};
pub use sorting::{rank, sort_listings, SortKey};
pub use validation::{validate, validate_values, ValidationError, ValidationErrors};
