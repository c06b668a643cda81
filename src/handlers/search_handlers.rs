use anyhow::anyhow;
use clap::Args;
use std::path::PathBuf;
use staymatch_core::{
    has_attribute_filters, load_listings, parse_attribute_filters, search, Listing,
    SearchFilterRequest, SortKey, StructuralFilters,
};

use crate::errors::map_listings_load_error;
use crate::state::AppState;
use crate::ui::{
    format_filters, format_listing, print_block, print_heading, print_status, print_warning,
    StatusLevel,
};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// JSON array of listings returned by the listing source
    #[arg(value_name = "LISTINGS")]
    pub listings: PathBuf,

    /// Filter by attribute (format: key=value, can be specified multiple times)
    #[arg(short, long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Sort key: relevance, priceAsc, priceDesc, newest, ratingDesc, ratingAsc
    #[arg(short, long = "sort", value_name = "KEY", default_value = "relevance")]
    pub sort_by: String,

    /// Category the listing source was queried for; filters outside it are reported
    #[arg(short, long, value_name = "NAME")]
    pub category: Option<String>,

    /// Print the results as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

/// Classify and rank a result set from the listing source
pub fn handle_search(state: &AppState, args: &SearchArgs) -> anyhow::Result<()> {
    let candidates = load_listings(&args.listings).map_err(|e| {
        let (title, message, details) = map_listings_load_error(&e, &args.listings);
        anyhow!("{}: {}\n{}", title, message, details)
    })?;

    for filter_str in &args.filters {
        if !filter_str.contains('=') {
            print_warning(&format!(
                "Invalid filter format '{}'. Expected 'name=value'",
                filter_str
            ));
        }
    }

    let request = SearchFilterRequest {
        structural: StructuralFilters {
            category: args.category.clone(),
            ..Default::default()
        },
        attributes: parse_attribute_filters(&state.registry, &args.filters),
    };

    if let Some(category) = &args.category {
        let filterable = state.registry.filterable_keys(&[category.as_str()]);
        for key in request.attributes.keys() {
            if !filterable.contains(key) {
                print_warning(&format!("'{}' is not an attribute of category '{}'", key, category));
            }
        }
    }

    let sort_key = SortKey::parse(&args.sort_by);
    if sort_key.as_str() != args.sort_by {
        print_warning(&format!(
            "Unknown sort key '{}', using {}",
            args.sort_by, sort_key
        ));
    }

    let results = search(candidates, &request, sort_key);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    print_heading(1, "Search Results");

    if !request.attributes.is_empty() {
        print_heading(2, "Active Filters");
        print_block(&format_filters(&request.attributes));

        if !has_attribute_filters(&request.attributes) {
            print_status(
                "No filter constrains the results; every listing is a perfect match.",
                StatusLevel::Info,
            );
        }
    }

    println!("**Sorted by:** {}\n", sort_key);

    print_tier("Perfect Matches", &results.perfect);
    print_tier("Location Matches", &results.location);

    if results.total() == 0 {
        print_status("No listings to show.", StatusLevel::Info);
    } else if results.perfect.is_empty() {
        print_status(
            "No listing has every requested feature; showing location matches only.",
            StatusLevel::Warning,
        );
    }

    Ok(())
}

fn print_tier(title: &str, listings: &[Listing]) {
    print_heading(2, &format!("{} ({})", title, listings.len()));

    if listings.is_empty() {
        println!("_None._\n");
        return;
    }

    for listing in listings {
        print_block(&format_listing(listing));
    }
}
