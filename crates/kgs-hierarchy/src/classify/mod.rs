//! Per-kind translation of specimen and state records into node payloads.
//!
//! Each kind has its own module; the functions here dispatch on the [`KindEntry`] a record
//! was classified with.

mod common;
mod subject;
mod subject_group;
mod tissue_sample;
mod tissue_sample_collection;

use kgs_model::payload::References;
use kgs_model::{HierarchyNode, NodeData, RelationType, StudiedSpecimen, StudiedState};

use crate::kind::{KindEntry, SpecimenKind};
use crate::options::HierarchyOptions;
use crate::overview::OverviewAggregator;

/// Payload of a specimen node.
///
/// `parent` is the group the specimen was reached through, whose related products the
/// specimen inherits.
pub fn translate_specimen(
    entry: &KindEntry,
    specimen: &StudiedSpecimen,
    parent: Option<&StudiedSpecimen>,
    options: &HierarchyOptions,
) -> NodeData {
    let version = options.dataset_version_id();
    match entry.kind {
        SpecimenKind::Subject => {
            NodeData::Subject(Box::new(subject::translate_specimen(specimen, parent, version)))
        }
        SpecimenKind::SubjectGroup => NodeData::SubjectGroup(Box::new(
            subject_group::translate_specimen(specimen, parent, version),
        )),
        SpecimenKind::TissueSample => NodeData::TissueSample(Box::new(
            tissue_sample::translate_specimen(specimen, parent, version),
        )),
        SpecimenKind::TissueSampleCollection => NodeData::TissueSampleCollection(Box::new(
            tissue_sample_collection::translate_specimen(specimen, parent, version),
        )),
    }
}

/// Payload of a state node labelled `letter`.
pub fn translate_state(
    entry: &KindEntry,
    state: &StudiedState,
    owner: &StudiedSpecimen,
    letter: &str,
    options: &HierarchyOptions,
) -> NodeData {
    let version = options.dataset_version_id();
    let owner_label = entry.label(owner);
    match entry.kind {
        SpecimenKind::Subject => NodeData::Subject(Box::new(subject::translate_state(
            state,
            owner,
            letter,
            &owner_label,
            version,
        ))),
        SpecimenKind::SubjectGroup => NodeData::SubjectGroup(Box::new(
            subject_group::translate_state(state, owner, version),
        )),
        SpecimenKind::TissueSample => NodeData::TissueSample(Box::new(
            tissue_sample::translate_state(state, owner, letter, &owner_label, version),
        )),
        SpecimenKind::TissueSampleCollection => NodeData::TissueSampleCollection(Box::new(
            tissue_sample_collection::translate_state(state, owner, letter, &owner_label, version),
        )),
    }
}

struct Characteristics<'a> {
    id: Option<&'a str>,
    sex: &'a References,
    species: &'a References,
    strain: &'a References,
    genetic_strain_type: &'a References,
    pathology: &'a References,
    anatomical_location: Option<&'a References>,
}

fn characteristics(data: &NodeData) -> Characteristics<'_> {
    match data {
        NodeData::Subject(d) => Characteristics {
            id: d.id.as_deref(),
            sex: &d.sex,
            species: &d.species,
            strain: &d.strain,
            genetic_strain_type: &d.genetic_strain_type,
            pathology: &d.pathology,
            anatomical_location: None,
        },
        NodeData::SubjectGroup(d) => Characteristics {
            id: d.id.as_deref(),
            sex: &d.sex,
            species: &d.species,
            strain: &d.strain,
            genetic_strain_type: &d.genetic_strain_type,
            pathology: &d.pathology,
            anatomical_location: None,
        },
        NodeData::TissueSample(d) => Characteristics {
            id: d.id.as_deref(),
            sex: &d.sex,
            species: &d.species,
            strain: &d.strain,
            genetic_strain_type: &d.genetic_strain_type,
            pathology: &d.pathology,
            anatomical_location: Some(&d.anatomical_location),
        },
        NodeData::TissueSampleCollection(d) => Characteristics {
            id: d.id.as_deref(),
            sex: &d.sex,
            species: &d.species,
            strain: &d.strain,
            genetic_strain_type: &d.genetic_strain_type,
            pathology: &d.pathology,
            anatomical_location: Some(&d.anatomical_location),
        },
    }
}

/// Count a translated specimen payload into the overview.
pub fn aggregate_overview(entry: &KindEntry, data: &NodeData, aggregator: &mut OverviewAggregator) {
    let c = characteristics(data);
    let Some(id) = c.id else {
        return;
    };
    let prefix = entry.prefix.as_str();
    aggregator.add_specimen_id(entry.kind, id);
    aggregator.add_sex(id, c.sex.as_deref(), prefix);
    aggregator.add_strains(id, c.strain.as_deref(), prefix);
    aggregator.add_species(id, c.species.as_deref(), prefix);
    aggregator.add_genetic_strain_types(id, c.genetic_strain_type.as_deref(), prefix);
    aggregator.add_pathology(id, c.pathology.as_deref(), prefix);
    if let Some(locations) = c.anatomical_location {
        aggregator.add_anatomical_locations(locations.as_deref());
    }
}

/// Adjust a payload once the children of its node are known.
pub fn flush(data: &mut NodeData, children: &[HierarchyNode]) {
    if children.is_empty() {
        return;
    }
    let members = children
        .iter()
        .filter(|c| c.parent_relation_type == Some(RelationType::PartOf))
        .count();
    match data {
        NodeData::SubjectGroup(d) => subject_group::flush(d, members),
        NodeData::TissueSampleCollection(d) => tissue_sample_collection::flush(d, members),
        NodeData::Subject(_) | NodeData::TissueSample(_) => {}
    }
}
