use staymatch_core::{
    AttributeDefinition, AttributeFilters, AttributeKind, AttributeValue, CategoryDefinition,
    EffectiveAttribute, Listing,
};

/// Format an attribute value for display
pub fn format_value(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Bool(true) => "yes".to_string(),
        AttributeValue::Bool(false) => "no".to_string(),
        other => other.to_string(),
    }
}

/// Describe an attribute's kind and rules, e.g. "number, required, 1 to 50"
pub fn format_rules(def: &AttributeDefinition) -> String {
    let mut parts = vec![def.kind.name().to_string()];

    if def.is_required() {
        parts.push("required".to_string());
    }

    if let Some(rules) = &def.validation {
        match (rules.min, rules.max) {
            (Some(min), Some(max)) => parts.push(format!("{} to {}", min, max)),
            (Some(min), None) => parts.push(format!("at least {}", min)),
            (None, Some(max)) => parts.push(format!("at most {}", max)),
            (None, None) => {}
        }
    }

    if let AttributeKind::Select { options } = &def.kind {
        parts.push(format!("one of: {}", options.join(" | ")));
    }

    parts.join(", ")
}

/// One form field line
pub fn format_attribute_line(effective: &EffectiveAttribute) -> String {
    let def = &effective.attribute;
    format!("- {} ({}): {}", def.key, format_rules(def), def.label)
}

/// Split a form into sections by source group, keeping form order
pub fn form_sections(attributes: &[EffectiveAttribute]) -> Vec<(String, Vec<&EffectiveAttribute>)> {
    let mut sections: Vec<(String, Vec<&EffectiveAttribute>)> = Vec::new();

    for effective in attributes {
        let heading = match (&effective.source_group_label, effective.is_shared) {
            (Some(label), true) => format!("{} (shared)", label),
            (Some(label), false) => label.clone(),
            (None, _) => format!("General ({})", effective.category),
        };

        match sections.iter_mut().find(|(existing, _)| *existing == heading) {
            Some((_, members)) => members.push(effective),
            None => sections.push((heading, vec![effective])),
        }
    }

    sections
}

/// Summary lines for a category
pub fn format_category(category: &CategoryDefinition) -> Vec<String> {
    let mut lines = Vec::new();

    if !category.description.is_empty() {
        lines.push(category.description.clone());
        lines.push(String::new());
    }

    lines.push(format!("- Attributes: {}", category.attributes.len()));

    if !category.groups.is_empty() {
        let groups: Vec<&str> = category.groups.values().map(|g| g.label.as_str()).collect();
        lines.push(format!("- Groups: {}", groups.join(", ")));
    }

    if !category.shared_groups.is_empty() {
        lines.push(format!("- Shared groups: {}", category.shared_groups.join(", ")));
    }

    lines
}

/// Detail lines for one search result
pub fn format_listing(listing: &Listing) -> Vec<String> {
    let mut lines = Vec::new();

    let promoted = if listing.is_promoted { " [promoted]" } else { "" };
    lines.push(format!("### {}{}", listing.title, promoted));
    lines.push(String::new());
    lines.push(format!("- ID: {}", listing.id));

    if let Some(category) = &listing.category {
        lines.push(format!("- Category: {}", category));
    }
    if let Some(price) = listing.min_price {
        lines.push(format!("- Price from: {}", price));
    }
    if let Some(rating) = listing.avg_rating {
        lines.push(format!("- Rating: {}", rating));
    }
    if let Some(published) = listing.published_date {
        lines.push(format!("- Published: {}", published.format("%Y-%m-%d")));
    }

    let features: Vec<String> = listing
        .category_attributes
        .iter()
        .map(|(key, value)| format!("{}={}", key, format_value(value)))
        .collect();
    if !features.is_empty() {
        lines.push(format!("- Attributes: {}", features.join(", ")));
    }

    lines
}

/// Active filter lines; inert entries are marked as ignored
pub fn format_filters(filters: &AttributeFilters) -> Vec<String> {
    filters
        .iter()
        .map(|(key, requested)| match requested {
            Some(value) if !staymatch_core::is_inert(Some(value)) => {
                format!("- **{}:** {}", key, format_value(value))
            }
            _ => format!("- **{}:** (ignored)", key),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use staymatch_core::SchemaRegistry;

    #[test]
    fn test_format_rules() {
        let registry = SchemaRegistry::builtin().unwrap();

        assert_eq!(
            format_rules(registry.definition("capacity").unwrap()),
            "number, required, 1 to 1000"
        );
        assert_eq!(format_rules(registry.definition("wifi").unwrap()), "boolean");
        assert_eq!(
            format_rules(registry.definition("vehicle_type").unwrap()),
            "select, required, one of: car | motorcycle | van | truck"
        );
    }

    #[test]
    fn test_form_sections_follow_form_order() {
        let registry = SchemaRegistry::builtin().unwrap();
        let form = registry.effective_attributes(&["meeting_room"]);
        let sections = form_sections(&form);

        let headings: Vec<&str> = sections.iter().map(|(h, _)| h.as_str()).collect();
        assert_eq!(
            headings,
            vec![
                "General (meeting_room)",
                "Equipment",
                "Venue basics (shared)",
                "Accessibility (shared)",
                "Amenities (shared)"
            ]
        );
        assert_eq!(sections[1].1.len(), 3);
    }

    #[test]
    fn test_format_listing() {
        let listing: Listing = serde_json::from_value(json!({
            "id": "l1",
            "title": "Harbour loft",
            "is_promoted": true,
            "min_price": 85.0,
            "published_date": "2024-03-02T08:00:00Z",
            "category_attributes": {"wifi": true, "bedrooms": 2}
        }))
        .unwrap();

        let lines = format_listing(&listing);
        assert_eq!(lines[0], "### Harbour loft [promoted]");
        assert!(lines.contains(&"- Price from: 85".to_string()));
        assert!(lines.contains(&"- Published: 2024-03-02".to_string()));
        assert!(lines.contains(&"- Attributes: bedrooms=2, wifi=yes".to_string()));
    }

    #[test]
    fn test_format_filters_marks_inert_entries() {
        let filters: AttributeFilters =
            serde_json::from_value(json!({"wifi": true, "pool": false})).unwrap();

        assert_eq!(
            format_filters(&filters),
            vec!["- **pool:** (ignored)".to_string(), "- **wifi:** yes".to_string()]
        );
    }
}
