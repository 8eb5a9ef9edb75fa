//! Type-specific display payloads attached to hierarchy nodes.
//!
//! Specimen and state payloads share one shape per kind; the `type` value tells them
//! apart (`Dataset.Subject` vs `Dataset.SubjectState`).

use serde::{Deserialize, Serialize};

use crate::reference::{TargetExternalReference, TargetInternalReference, Value};

pub type References = Option<Vec<TargetInternalReference>>;
pub type Links = Option<Vec<TargetExternalReference>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectData {
    #[serde(rename = "type")]
    pub type_name: Value<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strain: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genetic_strain_type: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_category: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handedness: Option<TargetInternalReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathology: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_remarks: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_links: Links,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_publications: References,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectGroupData {
    #[serde(rename = "type")]
    pub type_name: Value<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_subjects: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strain: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genetic_strain_type: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_category: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handedness: Option<TargetInternalReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathology: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_remarks: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_links: Links,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_publications: References,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TissueSampleData {
    #[serde(rename = "type")]
    pub type_name: Value<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tissue_sample_type: Option<TargetInternalReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anatomical_location: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<TargetInternalReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strain: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genetic_strain_type: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laterality: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_category: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathology: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_remarks: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_links: Links,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_publications: References,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TissueSampleCollectionData {
    #[serde(rename = "type")]
    pub type_name: Value<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tissue_samples: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tissue_sample_type: Option<TargetInternalReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anatomical_location: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<TargetInternalReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strain: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genetic_strain_type: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laterality: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_category: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathology: References,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_remarks: Option<Value<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_links: Links,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_publications: References,
}

macro_rules! impl_empty {
    ($($ty:ident),+) => {
        $(
            impl $ty {
                /// Empty payload tagged with the given document type.
                pub fn empty(type_name: &str) -> Self {
                    Self {
                        type_name: Value::new(type_name.to_string()),
                        ..Self::default()
                    }
                }
            }
        )+
    };
}

impl_empty!(
    SubjectData,
    SubjectGroupData,
    TissueSampleData,
    TissueSampleCollectionData
);

/// Payload of a hierarchy node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeData {
    Subject(Box<SubjectData>),
    SubjectGroup(Box<SubjectGroupData>),
    TissueSample(Box<TissueSampleData>),
    TissueSampleCollection(Box<TissueSampleCollectionData>),
}

impl NodeData {
    pub fn type_name(&self) -> &str {
        match self {
            NodeData::Subject(d) => d.type_name.as_str(),
            NodeData::SubjectGroup(d) => d.type_name.as_str(),
            NodeData::TissueSample(d) => d.type_name.as_str(),
            NodeData::TissueSampleCollection(d) => d.type_name.as_str(),
        }
    }
}
