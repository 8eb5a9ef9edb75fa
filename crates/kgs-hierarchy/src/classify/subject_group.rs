use kgs_model::{StudiedSpecimen, StudiedState, SubjectGroupData, Value, instance_uuid};

use super::common::{
    merged_remarks, optional_reference, other_publications, quantity, references,
    service_links, species_info, text,
};
use crate::kind::SpecimenKind;

pub(crate) fn translate_specimen(
    specimen: &StudiedSpecimen,
    parent: Option<&StudiedSpecimen>,
    dataset_version_id: Option<&str>,
) -> SubjectGroupData {
    let mut data = SubjectGroupData::empty(&SpecimenKind::SubjectGroup.document_type());
    data.id = Some(instance_uuid(&specimen.id).to_string());
    data.title = text(specimen.internal_identifier.as_deref());
    data.number_of_subjects = specimen
        .number_of_subjects
        .map(|n| Value::new(n.to_string()));
    fill_specimen(&mut data, specimen, parent, dataset_version_id);
    if let [state] = specimen.studied_state.as_slice() {
        fill_state(&mut data, state);
    }
    data
}

pub(crate) fn translate_state(
    state: &StudiedState,
    owner: &StudiedSpecimen,
    dataset_version_id: Option<&str>,
) -> SubjectGroupData {
    let mut data = SubjectGroupData::empty(&SpecimenKind::SubjectGroup.state_document_type());
    data.title = text(owner.internal_identifier());
    fill_specimen(&mut data, owner, None, dataset_version_id);
    fill_state(&mut data, state);
    data
}

/// Rewrite the subject count once the attached members are known.
pub(crate) fn flush(data: &mut SubjectGroupData, used: usize) {
    let Some(declared) = data.number_of_subjects.as_ref().map(|v| v.value.clone()) else {
        return;
    };
    if used > 0 && used.to_string() != declared {
        data.number_of_subjects =
            Some(Value::new(format!("{used} of {declared} used in this dataset")));
    }
}

fn fill_specimen(
    data: &mut SubjectGroupData,
    specimen: &StudiedSpecimen,
    parent: Option<&StudiedSpecimen>,
    dataset_version_id: Option<&str>,
) {
    data.service_links = service_links(&specimen.service_links, data.service_links.take());
    data.sex = references(&specimen.biological_sex);
    data.other_publications = other_publications(specimen, parent, dataset_version_id);
    let species = species_info(&specimen.species);
    data.species = species.species;
    data.strain = species.strain;
    data.genetic_strain_type = species.genetic_strain_type;
    data.additional_remarks = text(specimen.additional_remarks.as_deref());
}

fn fill_state(data: &mut SubjectGroupData, state: &StudiedState) {
    data.service_links = service_links(&state.service_links, data.service_links.take());
    data.additional_remarks =
        merged_remarks(data.additional_remarks.take(), state.additional_remarks.as_deref());
    data.attributes = references(&state.attribute);
    data.pathology = references(&state.pathology);
    data.handedness = optional_reference(state.handedness.as_ref());
    data.weight = quantity(state.weight.as_ref());
    data.age = quantity(state.age.as_ref());
    data.age_category = references(&state.age_category);
}
