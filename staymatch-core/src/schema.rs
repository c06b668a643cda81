use crate::error::{Error, Result};
use crate::models::{
    AttributeDefinition, CategoryDefinition, SchemaDocument, SharedAttributeGroup,
};
use crate::schema_validation::validate_schema_document;
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

const KEY_PATTERN: &str = r"^[a-z][a-z0-9_]*$";
const BUILTIN_SCHEMA: &str = include_str!("../data/categories.json");

/// One attribute as it appears on a rendered form, with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveAttribute {
    pub attribute: AttributeDefinition,
    /// Label of the owning group; `None` for a category's flat attributes
    pub source_group_label: Option<String>,
    pub is_shared: bool,
    /// Category that first contributed this attribute
    pub category: String,
}

impl EffectiveAttribute {
    pub fn key(&self) -> &str {
        &self.attribute.key
    }
}

/// Immutable registry of categories and shared groups.
///
/// Built once; every category's effective attribute list is resolved at build
/// time so lookups never re-walk the schema.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    categories: IndexMap<String, CategoryDefinition>,
    shared_groups: IndexMap<String, SharedAttributeGroup>,
    definitions: HashMap<String, AttributeDefinition>,
    resolved: HashMap<String, Vec<EffectiveAttribute>>,
}

impl SchemaRegistry {
    /// Validate and index a set of categories and shared groups
    pub fn build(
        categories: Vec<CategoryDefinition>,
        shared_groups: Vec<SharedAttributeGroup>,
    ) -> Result<Self> {
        let key_pattern = Regex::new(KEY_PATTERN)?;

        let mut shared: IndexMap<String, SharedAttributeGroup> = IndexMap::new();
        for group in shared_groups {
            if shared.contains_key(&group.name) {
                return Err(Error::DuplicateSharedGroup(group.name));
            }
            shared.insert(group.name.clone(), group);
        }

        let mut by_name: IndexMap<String, CategoryDefinition> = IndexMap::new();
        for category in categories {
            if by_name.contains_key(&category.name) {
                return Err(Error::DuplicateCategory(category.name));
            }
            by_name.insert(category.name.clone(), category);
        }

        // Keys form one namespace across the whole registry
        let mut definitions: HashMap<String, AttributeDefinition> = HashMap::new();

        for group in shared.values() {
            let context = format!("shared group '{}'", group.name);
            for attribute in &group.group.attributes {
                register_definition(&key_pattern, &mut definitions, attribute, &context)?;
            }
        }

        for category in by_name.values() {
            let context = format!("category '{}'", category.name);
            for attribute in category
                .attributes
                .iter()
                .chain(category.groups.values().flat_map(|g| g.attributes.iter()))
            {
                register_definition(&key_pattern, &mut definitions, attribute, &context)?;
            }

            for group_name in &category.shared_groups {
                if !shared.contains_key(group_name) {
                    warn!(
                        category = %category.name,
                        group = %group_name,
                        "category references unknown shared group"
                    );
                }
            }
        }

        let resolved = by_name
            .values()
            .map(|category| (category.name.clone(), resolve(category, &shared)))
            .collect();

        debug!(
            categories = by_name.len(),
            shared_groups = shared.len(),
            attributes = definitions.len(),
            "schema registry built"
        );

        Ok(Self {
            categories: by_name,
            shared_groups: shared,
            definitions,
            resolved,
        })
    }

    /// Build a registry from a deserialized schema document
    pub fn from_document(document: SchemaDocument) -> Result<Self> {
        let shared = document
            .shared_groups
            .into_iter()
            .map(|(name, group)| SharedAttributeGroup { name, group })
            .collect();
        Self::build(document.categories, shared)
    }

    /// Build a registry from a JSON schema document, checking its structure first
    pub fn from_json(document: Value) -> Result<Self> {
        validate_schema_document(&document).map_err(Error::SchemaDocument)?;
        let document: SchemaDocument = serde_json::from_value(document)?;
        Self::from_document(document)
    }

    /// The bundled marketplace catalog
    pub fn builtin() -> Result<Self> {
        let document: Value = serde_json::from_str(BUILTIN_SCHEMA)?;
        Self::from_json(document)
    }

    pub fn resolve_category(&self, name: &str) -> Option<&CategoryDefinition> {
        self.categories.get(name)
    }

    pub fn categories(&self) -> impl Iterator<Item = &CategoryDefinition> {
        self.categories.values()
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    pub fn shared_group(&self, name: &str) -> Option<&SharedAttributeGroup> {
        self.shared_groups.get(name)
    }

    pub fn shared_groups(&self) -> impl Iterator<Item = &SharedAttributeGroup> {
        self.shared_groups.values()
    }

    /// Look up an attribute definition by key anywhere in the registry
    pub fn definition(&self, key: &str) -> Option<&AttributeDefinition> {
        self.definitions.get(key)
    }

    /// Effective attributes of a set of categories, de-duplicated by key.
    /// Unknown category names contribute nothing.
    pub fn effective_attributes<S: AsRef<str>>(&self, names: &[S]) -> Vec<EffectiveAttribute> {
        let mut seen = HashSet::new();
        let mut attributes = Vec::new();

        for name in names {
            let name = name.as_ref();
            let Some(resolved) = self.resolved.get(name) else {
                debug!(category = %name, "no schema for category");
                continue;
            };

            for effective in resolved {
                if seen.insert(effective.attribute.key.as_str()) {
                    attributes.push(effective.clone());
                }
            }
        }

        attributes
    }

    /// Keys a search over these categories can filter on
    pub fn filterable_keys<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        self.effective_attributes(names)
            .into_iter()
            .map(|effective| effective.attribute.key)
            .collect()
    }

    /// Keys of a category's flat attributes and its own (non-shared) groups
    pub fn own_keys(&self, name: &str) -> Vec<&str> {
        let Some(category) = self.categories.get(name) else {
            return Vec::new();
        };

        category
            .attributes
            .iter()
            .chain(category.groups.values().flat_map(|g| g.attributes.iter()))
            .map(|attribute| attribute.key.as_str())
            .collect()
    }

    /// Keys of every shared group a category references
    pub fn shared_keys(&self, name: &str) -> Vec<&str> {
        let Some(category) = self.categories.get(name) else {
            return Vec::new();
        };

        category
            .shared_groups
            .iter()
            .filter_map(|group_name| self.shared_groups.get(group_name))
            .flat_map(|shared| shared.group.attributes.iter())
            .map(|attribute| attribute.key.as_str())
            .collect()
    }
}

fn register_definition(
    key_pattern: &Regex,
    definitions: &mut HashMap<String, AttributeDefinition>,
    attribute: &AttributeDefinition,
    context: &str,
) -> Result<()> {
    if !key_pattern.is_match(&attribute.key) {
        return Err(Error::InvalidKey {
            key: attribute.key.clone(),
            context: context.to_string(),
        });
    }

    match definitions.get(&attribute.key) {
        Some(existing) if !existing.kind.same_kind(&attribute.kind) => Err(Error::KindConflict {
            key: attribute.key.clone(),
            first: existing.kind.name(),
            second: attribute.kind.name(),
        }),
        Some(_) => Ok(()),
        None => {
            definitions.insert(attribute.key.clone(), attribute.clone());
            Ok(())
        }
    }
}

/// Own attributes, then own groups, then shared groups, first key wins
fn resolve(
    category: &CategoryDefinition,
    shared: &IndexMap<String, SharedAttributeGroup>,
) -> Vec<EffectiveAttribute> {
    let mut seen = HashSet::new();
    let mut attributes = Vec::new();

    let mut push = |attribute: &AttributeDefinition, label: Option<&str>, is_shared: bool| {
        if seen.insert(attribute.key.clone()) {
            attributes.push(EffectiveAttribute {
                attribute: attribute.clone(),
                source_group_label: label.map(str::to_string),
                is_shared,
                category: category.name.clone(),
            });
        }
    };

    for attribute in &category.attributes {
        push(attribute, None, false);
    }

    for group in category.groups.values() {
        for attribute in &group.attributes {
            push(attribute, Some(group.label.as_str()), false);
        }
    }

    for group_name in &category.shared_groups {
        if let Some(group) = shared.get(group_name) {
            for attribute in &group.group.attributes {
                push(attribute, Some(group.group.label.as_str()), true);
            }
        }
    }

    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttributeGroup, AttributeKind};
    use serde_json::json;

    fn boolean(key: &str) -> AttributeDefinition {
        AttributeDefinition {
            key: key.to_string(),
            label: key.to_string(),
            kind: AttributeKind::Boolean,
            validation: None,
            description: String::new(),
        }
    }

    fn number(key: &str) -> AttributeDefinition {
        AttributeDefinition {
            kind: AttributeKind::Number,
            ..boolean(key)
        }
    }

    fn shared(name: &str, keys: &[&str]) -> SharedAttributeGroup {
        SharedAttributeGroup {
            name: name.to_string(),
            group: AttributeGroup {
                label: name.to_uppercase(),
                attributes: keys.iter().map(|k| boolean(k)).collect(),
            },
        }
    }

    fn category(name: &str, own: &[&str], shared_groups: &[&str]) -> CategoryDefinition {
        CategoryDefinition {
            name: name.to_string(),
            description: String::new(),
            attributes: own.iter().map(|k| boolean(k)).collect(),
            groups: IndexMap::new(),
            shared_groups: shared_groups.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_builtin_registry_builds() {
        let registry = SchemaRegistry::builtin().unwrap();
        assert_eq!(
            registry.category_names(),
            vec![
                "apartment",
                "house",
                "meeting_room",
                "event_space",
                "parking_space",
                "coworking_desk"
            ]
        );
        assert!(registry.shared_group("accessibility").is_some());
        assert_eq!(
            registry.definition("capacity").map(|d| d.kind.name()),
            Some("number")
        );
    }

    #[test]
    fn test_effective_attributes_cover_all_sources_without_duplicates() {
        let registry = SchemaRegistry::builtin().unwrap();

        for category in registry.categories() {
            let effective = registry.effective_attributes(&[category.name.as_str()]);
            let keys: Vec<&str> = effective.iter().map(|e| e.key()).collect();
            let unique: HashSet<&str> = keys.iter().copied().collect();
            assert_eq!(keys.len(), unique.len(), "duplicates in {}", category.name);

            for key in registry
                .own_keys(&category.name)
                .into_iter()
                .chain(registry.shared_keys(&category.name))
            {
                assert!(unique.contains(key), "{} missing {}", category.name, key);
            }
        }
    }

    #[test]
    fn test_effective_attribute_order_and_sources() {
        let registry = SchemaRegistry::builtin().unwrap();
        let effective = registry.effective_attributes(&["meeting_room"]);

        assert_eq!(effective[0].key(), "room_layout");
        assert_eq!(effective[0].source_group_label, None);
        assert!(!effective[0].is_shared);

        let capacity = effective.iter().find(|e| e.key() == "capacity").unwrap();
        assert_eq!(capacity.source_group_label.as_deref(), Some("Venue basics"));
        assert!(capacity.is_shared);

        let projector = effective.iter().find(|e| e.key() == "projector").unwrap();
        assert_eq!(projector.source_group_label.as_deref(), Some("Equipment"));
        assert!(!projector.is_shared);

        let wifi = effective.iter().find(|e| e.key() == "wifi").unwrap();
        assert_eq!(wifi.source_group_label.as_deref(), Some("Amenities"));
        assert!(wifi.is_shared);

        let last_own = effective.iter().rposition(|e| !e.is_shared).unwrap();
        let first_shared = effective.iter().position(|e| e.is_shared).unwrap();
        assert!(last_own < first_shared);
    }

    #[test]
    fn test_shared_group_appears_once_across_categories() {
        let registry = SchemaRegistry::builtin().unwrap();
        let effective = registry.effective_attributes(&["apartment", "house"]);

        let wifi_count = effective.iter().filter(|e| e.key() == "wifi").count();
        assert_eq!(wifi_count, 1);

        let max_guests = effective.iter().filter(|e| e.key() == "max_guests").count();
        assert_eq!(max_guests, 1);

        let pool = effective.iter().find(|e| e.key() == "pool").unwrap();
        assert_eq!(pool.category, "house");
    }

    #[test]
    fn test_overlapping_shared_groups_do_not_crash() {
        let registry = SchemaRegistry::build(
            vec![category("studio", &["loft"], &["comfort", "basics"])],
            vec![shared("comfort", &["wifi", "heating"]), shared("basics", &["wifi", "kettle"])],
        )
        .unwrap();

        let keys = registry.filterable_keys(&["studio"]);
        assert_eq!(keys, vec!["loft", "wifi", "heating", "kettle"]);
    }

    #[test]
    fn test_unknown_category_resolves_to_nothing() {
        let registry = SchemaRegistry::builtin().unwrap();

        assert!(registry.resolve_category("castle").is_none());
        assert!(registry.effective_attributes(&["castle"]).is_empty());
        assert!(registry.own_keys("castle").is_empty());
        assert!(registry.shared_keys("castle").is_empty());

        let mixed = registry.effective_attributes(&["castle", "parking_space"]);
        assert_eq!(mixed[0].key(), "vehicle_type");
    }

    #[test]
    fn test_unknown_shared_group_is_not_fatal() {
        let registry =
            SchemaRegistry::build(vec![category("studio", &["loft"], &["missing"])], vec![])
                .unwrap();

        assert_eq!(registry.filterable_keys(&["studio"]), vec!["loft"]);
        assert!(registry.shared_keys("studio").is_empty());
    }

    #[test]
    fn test_kind_conflict_fails_fast() {
        let mut studio = category("studio", &[], &["comfort"]);
        studio.attributes.push(number("wifi"));

        let result = SchemaRegistry::build(vec![studio], vec![shared("comfort", &["wifi"])]);

        match result {
            Err(Error::KindConflict { key, first, second }) => {
                assert_eq!(key, "wifi");
                assert_eq!(first, "boolean");
                assert_eq!(second, "number");
            }
            other => panic!("expected kind conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_same_key_same_kind_is_shared() {
        let registry = SchemaRegistry::build(
            vec![
                category("studio", &["balcony"], &[]),
                category("villa", &["balcony"], &[]),
            ],
            vec![],
        )
        .unwrap();

        assert_eq!(registry.filterable_keys(&["studio", "villa"]), vec!["balcony"]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = SchemaRegistry::build(
            vec![category("studio", &[], &[]), category("studio", &[], &[])],
            vec![],
        );
        assert!(matches!(result, Err(Error::DuplicateCategory(name)) if name == "studio"));

        let result = SchemaRegistry::build(vec![], vec![shared("a", &[]), shared("a", &[])]);
        assert!(matches!(result, Err(Error::DuplicateSharedGroup(name)) if name == "a"));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let result = SchemaRegistry::build(vec![category("studio", &["Has Space"], &[])], vec![]);
        assert!(matches!(result, Err(Error::InvalidKey { key, .. }) if key == "Has Space"));
    }

    #[test]
    fn test_from_json_document() {
        let registry = SchemaRegistry::from_json(json!({
            "shared_groups": {
                "safety": {
                    "label": "Safety",
                    "attributes": [{"key": "smoke_detector", "label": "Smoke detector", "kind": "boolean"}]
                }
            },
            "categories": [{
                "name": "boat",
                "attributes": [
                    {"key": "berths", "label": "Berths", "kind": "number", "validation": {"min": 1, "required": true}}
                ],
                "groups": {
                    "equipment": {
                        "label": "On board",
                        "attributes": [{"key": "dinghy", "label": "Dinghy", "kind": "boolean"}]
                    }
                },
                "shared_groups": ["safety"]
            }]
        }))
        .unwrap();

        assert_eq!(registry.own_keys("boat"), vec!["berths", "dinghy"]);
        assert_eq!(registry.shared_keys("boat"), vec!["smoke_detector"]);
        assert!(registry.definition("berths").unwrap().is_required());
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        let result = SchemaRegistry::from_json(json!({"categories": [{"attributes": []}]}));
        assert!(matches!(result, Err(Error::SchemaDocument(errors)) if !errors.is_empty()));
    }
}
