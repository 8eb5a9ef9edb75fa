//! Reference and value wrappers used by search documents.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A single document value, serialized as `{"value": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Value<T> {
    pub value: T,
}

impl<T> Value<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl Value<String> {
    /// Wraps a trimmed string, `None` when blank.
    pub fn text(value: Option<&str>) -> Option<Self> {
        value
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Self::new(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceContext {
    pub tab: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
}

/// Link to another instance in the index.
///
/// Ordering compares the lower-cased value only; absent values sort first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInternalReference {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ReferenceContext>,
}

impl TargetInternalReference {
    pub fn new(reference: Option<String>, value: Option<String>) -> Self {
        Self {
            reference,
            value,
            count: None,
            context: None,
        }
    }

    pub fn with_context(mut self, context: ReferenceContext) -> Self {
        self.context = Some(context);
        self
    }

    fn sort_key(&self) -> Option<String> {
        self.value.as_ref().map(|v| v.to_lowercase())
    }

    /// Compare by lower-cased value, the order used for every displayed reference list.
    pub fn cmp_by_value(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Link to an external resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetExternalReference {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TargetExternalReference {
    pub fn new(url: Option<String>, value: Option<String>) -> Self {
        Self { url, value }
    }
}
