use anyhow::{anyhow, bail, Context};
use clap::Args;
use std::path::PathBuf;
use staymatch_core::{load_values, save_values, AttributeValues, ListingAttributeEditor};

use crate::errors::map_values_load_error;
use crate::operations::parse_assignments;
use crate::state::AppState;
use crate::ui::{format_value, print_block, print_heading, print_status, StatusLevel};

#[derive(Args, Debug)]
pub struct ListingArgs {
    /// Attach a category (can be specified multiple times)
    #[arg(short, long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Existing attribute values as a JSON object
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,

    /// Set an attribute value (format: key=value, can be specified multiple times)
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,

    /// Detach a category after the values are set (can be specified multiple times)
    #[arg(short, long = "detach", value_name = "NAME")]
    pub detach: Vec<String>,

    /// Write the reconciled values to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Run an edit session: attach categories, set values, detach, then validate
pub fn handle_listing(state: &AppState, args: &ListingArgs) -> anyhow::Result<()> {
    let persisted = match &args.values {
        Some(path) => load_values(path).map_err(|e| {
            let (title, message, details) = map_values_load_error(&e, path);
            anyhow!("{}: {}\n{}", title, message, details)
        })?,
        None => AttributeValues::new(),
    };

    let mut editor =
        ListingAttributeEditor::from_persisted(&state.registry, args.categories.clone(), persisted);

    for (key, value) in parse_assignments(&state.registry, &args.assignments)? {
        editor
            .set_value(&key, value)
            .with_context(|| format!("Cannot set '{}'", key))?;
    }

    for name in &args.detach {
        editor.remove_category(name);
    }

    print_heading(1, "Listing Attributes");
    println!("**Categories:** {}\n", display_list(editor.categories()));

    print_heading(2, "Values");
    if editor.values().is_empty() {
        println!("_No values set._\n");
    } else {
        let lines: Vec<String> = editor
            .values()
            .iter()
            .map(|(key, value)| format!("- {}: {}", key, format_value(value)))
            .collect();
        print_block(&lines);
    }

    let errors = editor.validate();

    if let Some(path) = &args.output {
        save_values(editor.values(), path)
            .with_context(|| format!("Failed to write values to {}", path.display()))?;
        print_status(&format!("Values written to {}", path.display()), StatusLevel::Info);
    }

    print_heading(2, "Validation");
    if errors.is_empty() {
        print_status("All attributes are valid.", StatusLevel::Success);
        return Ok(());
    }

    let lines: Vec<String> = errors
        .iter()
        .map(|(key, message)| format!("- {}: {}", key, message))
        .collect();
    print_block(&lines);
    print_status(
        &format!("{} attribute(s) need attention.", errors.len()),
        StatusLevel::Error,
    );

    bail!("listing attributes failed validation")
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
