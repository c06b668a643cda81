use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Attribute values attached to one listing, keyed by attribute key
pub type AttributeValues = BTreeMap<String, AttributeValue>;

/// Requested attribute filters; `None` (JSON null) entries are inert
pub type AttributeFilters = BTreeMap<String, Option<AttributeValue>>;

/// A single attribute value as stored on a listing or sent as a filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Truthiness of a stored value: `true`, a non-zero number, or a non-empty string
    pub fn is_truthy(&self) -> bool {
        match self {
            AttributeValue::Bool(b) => *b,
            AttributeValue::Number(n) => *n != 0.0 && !n.is_nan(),
            AttributeValue::Text(s) => !s.is_empty(),
        }
    }

    /// Whether the value counts as "nothing entered"
    pub fn is_blank(&self) -> bool {
        matches!(self, AttributeValue::Text(s) if s.trim().is_empty())
    }

    /// Numeric reading of the value. Strings are parsed; only finite numbers count.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            AttributeValue::Number(n) => *n,
            AttributeValue::Text(s) => s.trim().parse::<f64>().ok()?,
            AttributeValue::Bool(_) => return None,
        };
        n.is_finite().then_some(n)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

/// The closed set of attribute kinds. Options only exist on `Select`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AttributeKind {
    Boolean,
    Number,
    Select { options: Vec<String> },
    Text,
}

impl AttributeKind {
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKind::Boolean => "boolean",
            AttributeKind::Number => "number",
            AttributeKind::Select { .. } => "select",
            AttributeKind::Text => "text",
        }
    }

    /// Two kinds are compatible when they are the same variant. Select options may differ.
    pub fn same_kind(&self, other: &AttributeKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: AttributeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
    #[serde(default)]
    pub description: String,
}

impl AttributeDefinition {
    pub fn is_required(&self) -> bool {
        self.validation.as_ref().is_some_and(|v| v.required)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeGroup {
    pub label: String,
    pub attributes: Vec<AttributeDefinition>,
}

/// A group defined once and referenced by name from many categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedAttributeGroup {
    pub name: String,
    #[serde(flatten)]
    pub group: AttributeGroup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
    #[serde(default)]
    pub groups: IndexMap<String, AttributeGroup>,
    #[serde(default)]
    pub shared_groups: Vec<String>,
}

/// On-disk shape of a schema document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub shared_groups: IndexMap<String, AttributeGroup>,
    pub categories: Vec<CategoryDefinition>,
}

/// A listing as returned by the listing source, already structurally filtered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub category_attributes: AttributeValues,
    #[serde(default)]
    pub is_promoted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Filters the listing source applies server-side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilterRequest {
    #[serde(default)]
    pub structural: StructuralFilters,
    #[serde(default)]
    pub attributes: AttributeFilters,
}
