pub mod formatting;
pub mod output;

pub use formatting::{
    form_sections, format_attribute_line, format_category, format_filters, format_listing,
    format_value,
};
pub use output::{print_block, print_heading, print_status, print_warning, StatusLevel};
