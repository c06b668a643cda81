pub mod error_mapper;

pub use error_mapper::{map_listings_load_error, map_schema_load_error, map_values_load_error};
