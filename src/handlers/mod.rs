pub mod catalog_handlers;
pub mod listing_handlers;
pub mod search_handlers;

pub use catalog_handlers::{handle_categories, handle_form};
pub use listing_handlers::{handle_listing, ListingArgs};
pub use search_handlers::{handle_search, SearchArgs};
