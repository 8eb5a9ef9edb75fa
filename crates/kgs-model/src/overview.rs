use std::collections::BTreeSet;

use serde::Serialize;

use crate::reference::{TargetInternalReference, Value};

/// Aggregate facts about all specimen shown in a hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenOverview {
    #[serde(rename = "type")]
    pub type_name: Value<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_subject_groups: Option<Value<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_subjects: Option<Value<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_tissue_sample_collections: Option<Value<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_tissue_samples: Option<Value<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<Vec<TargetInternalReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Vec<TargetInternalReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strains: Option<Vec<TargetInternalReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genetic_strain_types: Option<Vec<TargetInternalReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathology: Option<Vec<TargetInternalReference>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anatomical_locations_of_tissue_samples: Vec<TargetInternalReference>,
    #[serde(skip)]
    pub subject_ids: BTreeSet<String>,
    #[serde(skip)]
    pub subject_group_ids: BTreeSet<String>,
    #[serde(skip)]
    pub tissue_sample_ids: BTreeSet<String>,
    #[serde(skip)]
    pub tissue_sample_collection_ids: BTreeSet<String>,
}

pub const OVERVIEW_TYPE: &str = "Dataset.SpecimenOverview";

impl Default for SpecimenOverview {
    fn default() -> Self {
        Self {
            type_name: Value::new(OVERVIEW_TYPE.to_string()),
            number_of_subject_groups: None,
            number_of_subjects: None,
            number_of_tissue_sample_collections: None,
            number_of_tissue_samples: None,
            species: None,
            sex: None,
            strains: None,
            genetic_strain_types: None,
            pathology: None,
            anatomical_locations_of_tissue_samples: Vec::new(),
            subject_ids: BTreeSet::new(),
            subject_group_ids: BTreeSet::new(),
            tissue_sample_ids: BTreeSet::new(),
            tissue_sample_collection_ids: BTreeSet::new(),
        }
    }
}

impl SpecimenOverview {
    /// Uuids of every specimen in the tree, subjects first, without duplicates.
    pub fn all_specimen_ids(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.subject_ids
            .iter()
            .chain(&self.subject_group_ids)
            .chain(&self.tissue_sample_ids)
            .chain(&self.tissue_sample_collection_ids)
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect()
    }

    /// Distinct species names, usable as a search filter.
    pub fn species_filter(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.species
            .iter()
            .flatten()
            .filter_map(|r| r.value.clone())
            .filter(|v| seen.insert(v.clone()))
            .collect()
    }
}
