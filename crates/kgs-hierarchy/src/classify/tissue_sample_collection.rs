use kgs_model::{StudiedSpecimen, StudiedState, TissueSampleCollectionData, Value, instance_uuid};

use super::common::{
    anatomical_locations, merged_remarks, optional_reference, other_publications, quantity,
    references, service_links, species_info, text,
};
use crate::kind::SpecimenKind;
use crate::labels::full_state_title;

pub(crate) fn translate_specimen(
    specimen: &StudiedSpecimen,
    parent: Option<&StudiedSpecimen>,
    dataset_version_id: Option<&str>,
) -> TissueSampleCollectionData {
    let mut data =
        TissueSampleCollectionData::empty(&SpecimenKind::TissueSampleCollection.document_type());
    data.id = Some(instance_uuid(&specimen.id).to_string());
    data.title = text(specimen.internal_identifier.as_deref());
    data.tissue_samples = specimen
        .number_of_tissue_samples
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
    letter: &str,
    owner_label: &str,
    dataset_version_id: Option<&str>,
) -> TissueSampleCollectionData {
    let mut data = TissueSampleCollectionData::empty(
        &SpecimenKind::TissueSampleCollection.state_document_type(),
    );
    let owner_name = owner.internal_identifier().unwrap_or(owner_label);
    data.title = text(Some(full_state_title(letter, owner_name).as_str()));
    fill_specimen(&mut data, owner, None, dataset_version_id);
    fill_state(&mut data, state);
    data
}

/// Rewrite the sample count once the attached samples are known.
pub(crate) fn flush(data: &mut TissueSampleCollectionData, used: usize) {
    let Some(total) = data.tissue_samples.as_ref().map(|v| v.value.clone()) else {
        return;
    };
    if used > 0 && used.to_string() != total {
        data.tissue_samples = Some(Value::new(format!(
            "total: {total}, used in this dataset: {used}"
        )));
    }
}

fn fill_specimen(
    data: &mut TissueSampleCollectionData,
    specimen: &StudiedSpecimen,
    parent: Option<&StudiedSpecimen>,
    dataset_version_id: Option<&str>,
) {
    data.tissue_sample_type = optional_reference(specimen.tissue_sample_type.as_ref());
    data.service_links = service_links(&specimen.service_links, data.service_links.take());
    data.sex = references(&specimen.biological_sex);
    data.anatomical_location = anatomical_locations(&specimen.anatomical_location);
    data.laterality = references(&specimen.laterality);
    let species = species_info(&specimen.species);
    data.species = species.species;
    data.strain = species.strain;
    data.genetic_strain_type = species.genetic_strain_type;
    data.origin = optional_reference(specimen.origin.as_ref());
    data.additional_remarks = text(specimen.additional_remarks.as_deref());
    data.other_publications = other_publications(specimen, parent, dataset_version_id);
}

fn fill_state(data: &mut TissueSampleCollectionData, state: &StudiedState) {
    data.additional_remarks =
        merged_remarks(data.additional_remarks.take(), state.additional_remarks.as_deref());
    data.attributes = references(&state.attribute);
    data.service_links = service_links(&state.service_links, data.service_links.take());
    data.pathology = references(&state.pathology);
    data.weight = quantity(state.weight.as_ref());
    data.age = quantity(state.age.as_ref());
    if !state.age_category.is_empty() {
        data.age_category = references(&state.age_category);
    }
}
