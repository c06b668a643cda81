use crate::state::AppState;
use crate::ui::{
    form_sections, format_attribute_line, format_category, print_block, print_heading,
    print_warning,
};

/// Print every category with its groups and shared group references
pub fn handle_categories(state: &AppState) -> anyhow::Result<()> {
    print_heading(1, &format!("Categories ({})", state.schema_name()));

    for category in state.registry.categories() {
        print_heading(2, &category.name);
        print_block(&format_category(category));
    }

    print_heading(1, "Shared Groups");

    for shared in state.registry.shared_groups() {
        print_heading(2, &format!("{}: {}", shared.name, shared.group.label));
        let keys: Vec<String> = shared
            .group
            .attributes
            .iter()
            .map(|a| format!("- {}", a.key))
            .collect();
        print_block(&keys);
    }

    Ok(())
}

/// Print the form a listing with these categories would render
pub fn handle_form(state: &AppState, categories: &[String]) -> anyhow::Result<()> {
    for name in categories {
        if state.registry.resolve_category(name).is_none() {
            print_warning(&format!("Unknown category '{}', it has no attributes", name));
        }
    }

    let form = state.registry.effective_attributes(categories);
    print_heading(1, &format!("Form: {}", categories.join(", ")));

    if form.is_empty() {
        println!("_No attributes for these categories._\n");
        return Ok(());
    }

    for (heading, attributes) in form_sections(&form) {
        print_heading(2, &heading);
        let lines: Vec<String> = attributes.into_iter().map(format_attribute_line).collect();
        print_block(&lines);
    }

    Ok(())
}
