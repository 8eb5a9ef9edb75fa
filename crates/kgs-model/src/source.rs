//! Studied specimen records as materialized by the knowledge graph query layer.
//!
//! Field names follow the camelCase keys of the query result so a result list can be
//! deserialized directly. Every collection defaults to empty when the key is absent or null.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ModelError, Result};
use crate::quantity::QuantitativeValueOrRange;

/// Treats `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullNameRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl FullNameRef {
    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            full_name: Some(full_name.into()),
        }
    }

    /// Reference without an id, used for placeholder values such as "Undefined".
    pub fn unnamed(full_name: impl Into<String>) -> Self {
        Self {
            id: None,
            full_name: Some(full_name.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullNameRefWithVersion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub fallback_name: Option<String>,
    #[serde(default)]
    pub version_identifier: Option<String>,
}

/// A species, or a strain pointing at its species.
///
/// When `species` is set, the entry itself is a strain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesOrStrain {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub species: Option<FullNameRef>,
    #[serde(default)]
    pub genetic_strain_type: Option<FullNameRef>,
}

impl SpeciesOrStrain {
    pub fn as_full_name_ref(&self) -> FullNameRef {
        FullNameRef {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnatomicalLocation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub fallback_name: Option<String>,
    #[serde(default)]
    pub brain_atlas: Option<String>,
    #[serde(default)]
    pub brain_atlas_version: Option<FullNameRefWithVersion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenServiceLink {
    #[serde(default)]
    pub open_data_in: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl SpecimenServiceLink {
    /// `"Open {name} in {service}"`, or `None` unless both parts are known.
    pub fn display_label(&self) -> Option<String> {
        match (&self.name, &self.service) {
            (Some(name), Some(service)) => Some(format!("Open {name} in {service}")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenServiceLinkCollection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub from_file_bundle: Vec<SpecimenServiceLink>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub from_file: Vec<SpecimenServiceLink>,
}

/// A research product the specimen is (also) used in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedProducts {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    /// Groups/collections for which this product lists its members individually.
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups_with_individual_sub_element_specification: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudiedState {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub descended_from: Vec<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    #[serde(default)]
    pub lookup_label: Option<String>,
    #[serde(default)]
    pub additional_remarks: Option<String>,
    #[serde(default)]
    pub age: Option<QuantitativeValueOrRange>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub age_category: Vec<FullNameRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attribute: Vec<FullNameRef>,
    #[serde(default)]
    pub handedness: Option<FullNameRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pathology: Vec<FullNameRef>,
    #[serde(default)]
    pub weight: Option<QuantitativeValueOrRange>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_links: Vec<SpecimenServiceLinkCollection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudiedSpecimen {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    #[serde(default)]
    pub internal_identifier: Option<String>,
    #[serde(default)]
    pub lookup_label: Option<String>,
    #[serde(default)]
    pub number_of_subjects: Option<u64>,
    #[serde(default)]
    pub number_of_tissue_samples: Option<u64>,
    #[serde(default)]
    pub additional_remarks: Option<String>,
    #[serde(default)]
    pub origin: Option<FullNameRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub species: Vec<SpeciesOrStrain>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub anatomical_location: Vec<AnatomicalLocation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub biological_sex: Vec<FullNameRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub laterality: Vec<FullNameRef>,
    #[serde(default)]
    pub tissue_sample_type: Option<FullNameRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub studied_state: Vec<StudiedState>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_part_of: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sub_elements: Vec<StudiedSpecimen>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_links: Vec<SpecimenServiceLinkCollection>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub used_in_datasets: Vec<RelatedProducts>,
}

impl StudiedSpecimen {
    pub fn new(id: impl Into<String>, specimen_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            types: vec![specimen_type.into()],
            ..Self::default()
        }
    }

    /// Parse a JSON array of studied specimen, rejecting entries without an id.
    pub fn from_json_list(json: &str) -> Result<Vec<Self>> {
        let specimens: Vec<Self> = serde_json::from_str(json)?;
        for (position, specimen) in specimens.iter().enumerate() {
            specimen.check_ids(position)?;
        }
        Ok(specimens)
    }

    fn check_ids(&self, position: usize) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ModelError::MissingId {
                kind: "studied specimen",
                position,
            });
        }
        if let Some(idx) = self.studied_state.iter().position(|s| s.id.trim().is_empty()) {
            return Err(ModelError::MissingId {
                kind: "studied state",
                position: idx,
            });
        }
        for (idx, sub) in self.sub_elements.iter().enumerate() {
            sub.check_ids(idx)?;
        }
        Ok(())
    }

    pub fn has_type(&self, specimen_type: &str) -> bool {
        self.types.iter().any(|t| t == specimen_type)
    }

    /// Trimmed internal identifier, `None` when blank.
    pub fn internal_identifier(&self) -> Option<&str> {
        self.internal_identifier
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl StudiedState {
    pub fn new(id: impl Into<String>, state_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            types: vec![state_type.into()],
            ..Self::default()
        }
    }

    pub fn has_type(&self, state_type: &str) -> bool {
        self.types.iter().any(|t| t == state_type)
    }
}
