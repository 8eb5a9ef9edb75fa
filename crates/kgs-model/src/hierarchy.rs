//! Display tree produced for the specimen section of a dataset document.

use std::cmp::Ordering;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::ids::NodeKey;
use crate::overview::SpecimenOverview;
use crate::payload::NodeData;

/// How a node relates to its parent in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    #[serde(rename = "partOf")]
    PartOf,
    #[serde(rename = "descendentFrom")]
    DescendentFrom,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::PartOf => "partOf",
            RelationType::DescendentFrom => "descendentFrom",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub key: NodeKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_relation_type: Option<RelationType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchyNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
}

impl HierarchyNode {
    pub fn new(key: NodeKey, parent_relation_type: Option<RelationType>) -> Self {
        Self {
            key,
            title: None,
            color: None,
            parent_relation_type,
            children: Vec::new(),
            data: None,
        }
    }

    /// Title order with untitled nodes first.
    pub fn cmp_by_title(&self, other: &Self) -> Ordering {
        self.title.cmp(&other.title)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(HierarchyNode::node_count).sum::<usize>()
    }

    /// Depth-first, pre-order walk over the subtree.
    pub fn walk(&self) -> Vec<&HierarchyNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }
}

/// Ordered color to label mapping, serialized as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    entries: Vec<(String, String)>,
}

impl Legend {
    pub fn from_entries(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn get(&self, color: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == color)
            .map(|(_, label)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, l)| l.as_str()).collect()
    }
}

impl Serialize for Legend {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (color, label) in &self.entries {
            map.serialize_entry(color, label)?;
        }
        map.end()
    }
}

/// A local, non-fatal irregularity found while building the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyIssue {
    pub instance: String,
    pub message: String,
}

impl HierarchyIssue {
    pub fn circular_reference(instance: &str) -> Self {
        Self {
            instance: instance.to_string(),
            message: format!("Circular reference detected - breaking at instance {instance}"),
        }
    }
}

impl fmt::Display for HierarchyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The translated specimen section of one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenHierarchy {
    pub hierarchy: HierarchyNode,
    pub legend: Legend,
    pub overview: SpecimenOverview,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<HierarchyIssue>,
}
