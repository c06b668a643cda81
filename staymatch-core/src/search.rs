use crate::filtering::{classify, is_inert};
use crate::models::{Listing, SearchFilterRequest};
use crate::sorting::{sort_listings, SortKey};
use serde::Serialize;
use tracing::debug;

/// Both result tiers, each ranked on its own. The tiers are never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub perfect: Vec<Listing>,
    pub location: Vec<Listing>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.perfect.len() + self.location.len()
    }
}

/// Classify candidates from the listing source and rank each tier.
///
/// Structural filters in the request are assumed to have been applied by the
/// listing source already; only the attribute filters are evaluated here.
pub fn search(candidates: Vec<Listing>, request: &SearchFilterRequest, sort_key: SortKey) -> SearchResults {
    let mut classification = classify(candidates, &request.attributes);

    sort_listings(&mut classification.perfect, sort_key);
    sort_listings(&mut classification.location, sort_key);

    debug!(
        sort = %sort_key,
        perfect = classification.perfect.len(),
        location = classification.location.len(),
        "search results ranked"
    );

    SearchResults {
        perfect: classification.perfect,
        location: classification.location,
    }
}

impl SearchFilterRequest {
    /// Query parameters for the listing source: structural filters plus every
    /// attribute filter that constrains anything
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let structural = &self.structural;
        let mut pairs = Vec::new();

        let mut push = |name: &str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((name.to_string(), value));
            }
        };

        push("postal_code", structural.postal_code.clone());
        push("date", structural.date.map(|d| d.format("%Y-%m-%d").to_string()));
        push("from", structural.from.map(|t| t.format("%H:%M").to_string()));
        push("to", structural.to.map(|t| t.format("%H:%M").to_string()));
        push("min_price", structural.min_price.map(|p| p.to_string()));
        push("max_price", structural.max_price.map(|p| p.to_string()));
        push("category", structural.category.clone());

        for (key, requested) in &self.attributes {
            if !is_inert(requested.as_ref()) {
                push(key, requested.as_ref().map(|v| v.to_string()));
            }
        }

        pairs
    }
}
