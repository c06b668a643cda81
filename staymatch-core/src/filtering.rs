use crate::models::{AttributeFilters, AttributeKind, AttributeValue, Listing};
use crate::schema::SchemaRegistry;
use tracing::{debug, warn};

/// Search results split by how well they satisfy the requested attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Listings that satisfy every attribute filter
    pub perfect: Vec<Listing>,
    /// Listings that only matched the upstream location/date/price filters
    pub location: Vec<Listing>,
}

/// A filter entry that is not a constraint: `false`, blank text, or null
pub fn is_inert(requested: Option<&AttributeValue>) -> bool {
    match requested {
        None => true,
        Some(AttributeValue::Bool(b)) => !b,
        Some(AttributeValue::Text(s)) => s.is_empty(),
        Some(AttributeValue::Number(_)) => false,
    }
}

/// Check if any filter entry actually constrains the results
pub fn has_attribute_filters(filters: &AttributeFilters) -> bool {
    filters.values().any(|requested| !is_inert(requested.as_ref()))
}

/// Check if a listing satisfies every attribute filter.
///
/// `true` asks for a truthy value; any other non-inert value must be equal
/// (same type, same value). Filters never exclude: `false` is ignored.
pub fn matches(listing: &Listing, filters: &AttributeFilters) -> bool {
    filters.iter().all(|(key, requested)| {
        let requested = requested.as_ref();
        if is_inert(requested) {
            return true;
        }

        let actual = listing.category_attributes.get(key);
        match requested {
            Some(AttributeValue::Bool(true)) => actual.is_some_and(AttributeValue::is_truthy),
            Some(requested) => actual == Some(requested),
            None => true,
        }
    })
}

/// Partition candidates into perfect and location matches, preserving input order
pub fn classify(candidates: Vec<Listing>, filters: &AttributeFilters) -> Classification {
    if filters.is_empty() {
        return Classification {
            perfect: candidates,
            location: Vec::new(),
        };
    }

    let (perfect, location): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|listing| matches(listing, filters));

    debug!(
        perfect = perfect.len(),
        location = location.len(),
        filters = filters.len(),
        "classified search results"
    );

    Classification { perfect, location }
}

/// Parse "key=value" filter strings, coercing each value by the key's declared kind.
/// Malformed entries are skipped; a later entry for the same key wins.
pub fn parse_attribute_filters(registry: &SchemaRegistry, filter_strings: &[String]) -> AttributeFilters {
    let mut filters = AttributeFilters::new();

    for filter_str in filter_strings {
        let Some((key, raw)) = filter_str.split_once('=') else {
            warn!(filter = %filter_str, "invalid filter format, expected key=value");
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            warn!(filter = %filter_str, "filter has an empty key");
            continue;
        }

        let kind = registry.definition(key).map(|d| &d.kind);
        let raw = raw.trim();
        if matches!(kind, Some(AttributeKind::Boolean)) && parse_flag(raw).is_none() {
            warn!(filter = %filter_str, "unreadable flag value, filter skipped");
            continue;
        }

        filters.insert(key.to_string(), Some(coerce_value(kind, raw)));
    }

    filters
}

/// Turn a raw string into a typed value for an attribute of the given kind.
/// Keys the schema does not know are guessed from the text itself, numbers
/// first so that "0" stays an exact constraint.
pub fn coerce_value(kind: Option<&AttributeKind>, raw: &str) -> AttributeValue {
    match kind {
        Some(AttributeKind::Boolean) => AttributeValue::Bool(parse_flag(raw).unwrap_or(false)),
        Some(AttributeKind::Number) => match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => AttributeValue::Number(n),
            _ => AttributeValue::Text(raw.to_string()),
        },
        Some(AttributeKind::Select { .. }) | Some(AttributeKind::Text) => {
            AttributeValue::Text(raw.to_string())
        }
        None => {
            debug!(value = %raw, "coercing value for unknown attribute");
            if let Some(n) = raw.parse::<f64>().ok().filter(|n| n.is_finite()) {
                AttributeValue::Number(n)
            } else if let Some(flag) = parse_flag(raw) {
                AttributeValue::Bool(flag)
            } else {
                AttributeValue::Text(raw.to_string())
            }
        }
    }
}

/// Read a checkbox-style flag; `None` when the text is not a recognizable flag
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" | "" => Some(false),
        _ => None,
    }
}
