use crate::error::{Error, Result};
use crate::models::{AttributeValue, AttributeValues};
use crate::schema::{EffectiveAttribute, SchemaRegistry};
use crate::validation::{validate_values, ValidationErrors};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A change to the set of categories attached to a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    AddCategory(String),
    RemoveCategory(String),
}

/// Categories attached to a listing together with its attribute values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    pub categories: Vec<String>,
    pub values: AttributeValues,
}

/// Apply one category transition to a listing's attribute values.
///
/// Removing a category drops its own keys, and drops its shared-group keys
/// unless one of the remaining categories still references that group. The
/// remaining shared keys are recomputed from the category set on every call.
pub fn reduce(
    registry: &SchemaRegistry,
    categories: &[String],
    values: &AttributeValues,
    action: &EditAction,
) -> EditorState {
    let mut next = EditorState {
        categories: categories.to_vec(),
        values: values.clone(),
    };

    match action {
        EditAction::AddCategory(name) => {
            if !next.categories.contains(name) {
                next.categories.push(name.clone());
            }
        }
        EditAction::RemoveCategory(name) => {
            let Some(position) = next.categories.iter().position(|c| c == name) else {
                return next;
            };
            next.categories.remove(position);

            for key in registry.own_keys(name) {
                next.values.remove(key);
            }

            let remaining_shared: HashSet<&str> = next
                .categories
                .iter()
                .flat_map(|other| registry.shared_keys(other))
                .collect();

            for key in registry.shared_keys(name) {
                if !remaining_shared.contains(key) {
                    next.values.remove(key);
                }
            }

            debug!(
                category = %name,
                kept = next.values.len(),
                dropped = values.len() - next.values.len(),
                "category detached"
            );
        }
    }

    next
}

/// Edit-session state holder for one listing's categories and values
#[derive(Debug, Clone)]
pub struct ListingAttributeEditor<'a> {
    registry: &'a SchemaRegistry,
    state: EditorState,
}

impl<'a> ListingAttributeEditor<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            state: EditorState::default(),
        }
    }

    /// Resume editing persisted data. Values no attached category can reach are dropped.
    pub fn from_persisted(
        registry: &'a SchemaRegistry,
        categories: Vec<String>,
        values: AttributeValues,
    ) -> Self {
        let mut editor = Self::new(registry);
        for category in categories {
            editor.add_category(&category);
        }

        let reachable: HashSet<String> = editor.form().into_iter().map(|e| e.attribute.key).collect();
        for (key, value) in values {
            if reachable.contains(&key) {
                editor.state.values.insert(key, value);
            } else {
                warn!(key = %key, "dropping value not reachable from attached categories");
            }
        }

        editor
    }

    pub fn apply(&mut self, action: &EditAction) {
        self.state = reduce(self.registry, &self.state.categories, &self.state.values, action);
    }

    pub fn add_category(&mut self, name: &str) {
        self.apply(&EditAction::AddCategory(name.to_string()));
    }

    pub fn remove_category(&mut self, name: &str) {
        self.apply(&EditAction::RemoveCategory(name.to_string()));
    }

    /// Set a value for a key offered by the current form
    pub fn set_value(&mut self, key: &str, value: AttributeValue) -> Result<()> {
        let reachable = self.form().iter().any(|e| e.key() == key);
        if !reachable {
            return Err(Error::UnreachableAttribute(key.to_string()));
        }

        self.state.values.insert(key.to_string(), value);
        Ok(())
    }

    pub fn clear_value(&mut self, key: &str) -> Option<AttributeValue> {
        self.state.values.remove(key)
    }

    pub fn categories(&self) -> &[String] {
        &self.state.categories
    }

    pub fn values(&self) -> &AttributeValues {
        &self.state.values
    }

    /// Attributes to render for the current category set
    pub fn form(&self) -> Vec<EffectiveAttribute> {
        self.registry.effective_attributes(&self.state.categories)
    }

    pub fn validate(&self) -> ValidationErrors {
        validate_values(&self.form(), &self.state.values)
    }

    pub fn into_parts(self) -> EditorState {
        self.state
    }
}
