//! Field conversions shared by all specimen kinds.

use kgs_model::payload::{Links, References};
use kgs_model::{
    AnatomicalLocation, FullNameRef, QuantitativeValueOrRange, ReferenceContext, RelatedProducts,
    SpeciesOrStrain, SpecimenServiceLinkCollection, StudiedSpecimen, StudiedState,
    TargetExternalReference, TargetInternalReference, Value, instance_uuid,
};

const UNDEFINED: &str = "Undefined";
const OTHER_PUBLICATIONS_TAB: &str = "Specimen";

pub(crate) fn text(value: Option<&str>) -> Option<Value<String>> {
    Value::text(value)
}

pub(crate) fn quantity(value: Option<&QuantitativeValueOrRange>) -> Option<Value<String>> {
    value.and_then(|q| Value::text(Some(q.display_string().as_str())))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Reference to an instance: its uuid, labelled by its full name or else the uuid.
pub(crate) fn reference(r: &FullNameRef) -> TargetInternalReference {
    let uuid = r.id.as_deref().map(|id| instance_uuid(id).to_string());
    let value = non_blank(r.full_name.as_deref())
        .map(str::to_string)
        .or_else(|| uuid.clone());
    TargetInternalReference::new(uuid, value)
}

pub(crate) fn optional_reference(r: Option<&FullNameRef>) -> Option<TargetInternalReference> {
    r.map(reference)
}

/// References in input order, `None` when there are none.
pub(crate) fn references<'a>(refs: impl IntoIterator<Item = &'a FullNameRef>) -> References {
    let out: Vec<_> = refs.into_iter().map(reference).collect();
    (!out.is_empty()).then_some(out)
}

fn distinct<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Species, strain and genetic strain type of a specimen.
///
/// When any entry of the species list points at a species, the list holds strains: the
/// pointed-at species become the species and the list itself becomes the strain.
#[derive(Debug, Default)]
pub(crate) struct SpeciesInfo {
    pub species: References,
    pub strain: References,
    pub genetic_strain_type: References,
}

pub(crate) fn species_info(list: &[SpeciesOrStrain]) -> SpeciesInfo {
    let indirect: Vec<&FullNameRef> = list.iter().filter_map(|s| s.species.as_ref()).collect();
    let direct: Vec<FullNameRef> = list.iter().map(SpeciesOrStrain::as_full_name_ref).collect();
    let genetic_strain_type = references(distinct(
        list.iter().filter_map(|s| s.genetic_strain_type.as_ref()),
    ));
    if indirect.is_empty() {
        SpeciesInfo {
            species: references(&direct),
            strain: None,
            genetic_strain_type,
        }
    } else {
        SpeciesInfo {
            species: references(indirect),
            strain: references(&direct),
            genetic_strain_type,
        }
    }
}

fn anatomical_reference(location: &AnatomicalLocation) -> TargetInternalReference {
    let name = non_blank(location.full_name.as_deref())
        .or(location.fallback_name.as_deref())
        .unwrap_or_default();
    if let Some(atlas) = non_blank(location.brain_atlas.as_deref()) {
        return TargetInternalReference::new(None, Some(format!("{name} ({atlas})")));
    }
    if let Some(version) = &location.brain_atlas_version {
        let atlas = non_blank(version.full_name.as_deref()).or(version.fallback_name.as_deref());
        let versioned = [atlas, version.version_identifier.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        return TargetInternalReference::new(None, Some(format!("{name} ({versioned})")));
    }
    reference(&FullNameRef {
        id: location.id.clone(),
        full_name: location.full_name.clone(),
    })
}

/// Anatomical locations sorted by label.
pub(crate) fn anatomical_locations(locations: &[AnatomicalLocation]) -> References {
    let mut out: Vec<_> = locations.iter().map(anatomical_reference).collect();
    out.sort_by(TargetInternalReference::cmp_by_value);
    (!out.is_empty()).then_some(out)
}

/// Merge the file and file-bundle links of `collections` into `existing`.
pub(crate) fn service_links(
    collections: &[SpecimenServiceLinkCollection],
    existing: Links,
) -> Links {
    let from_files = collections
        .iter()
        .flat_map(|c| c.from_file.iter().chain(&c.from_file_bundle))
        .map(|link| TargetExternalReference::new(link.open_data_in.clone(), link.display_label()));
    let mut links = distinct(existing.unwrap_or_default().into_iter().chain(from_files));
    links.sort_by(|a, b| a.value.cmp(&b.value));
    (!links.is_empty()).then_some(links)
}

/// Specimen remarks followed by state remarks, separated by a blank line.
pub(crate) fn merged_remarks(
    existing: Option<Value<String>>,
    state: Option<&str>,
) -> Option<Value<String>> {
    match (existing, text(state)) {
        (Some(a), Some(b)) => Some(Value::new(format!("{}\n\n{}", a.value, b.value))),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Distinct age categories over all states; a state without one counts as `Undefined`.
pub(crate) fn age_categories(states: &[StudiedState]) -> References {
    let undefined = FullNameRef::unnamed(UNDEFINED);
    let all = states.iter().flat_map(|state| {
        if state.age_category.is_empty() {
            vec![undefined.clone()]
        } else {
            state.age_category.clone()
        }
    });
    references(&distinct(all))
}

/// Shorten a DOI url to the DOI itself, starting at `10.`.
pub(crate) fn strip_doi_prefix(doi: &str) -> &str {
    match doi.find("/10.") {
        Some(idx) => &doi[idx + 1..],
        None => doi,
    }
}

fn restricts_group(product: &RelatedProducts, group_id: &str) -> bool {
    let group = instance_uuid(group_id);
    product
        .groups_with_individual_sub_element_specification
        .iter()
        .any(|g| instance_uuid(g) == group)
}

/// Related products a specimen is also used in, other than the record being translated.
///
/// A specimen inherits the products of its parent group, except those that list the
/// group's members individually.
pub(crate) fn other_publications(
    specimen: &StudiedSpecimen,
    parent: Option<&StudiedSpecimen>,
    dataset_version_id: Option<&str>,
) -> References {
    let inherited = parent.into_iter().flat_map(|p| {
        p.used_in_datasets
            .iter()
            .filter(move |product| !restricts_group(product, &p.id))
    });
    let products = distinct(inherited.chain(&specimen.used_in_datasets));
    let current = dataset_version_id.map(instance_uuid);
    let target = instance_uuid(&specimen.id).to_string();

    let mut out: Vec<TargetInternalReference> = products
        .into_iter()
        .filter_map(|product| {
            let id = instance_uuid(product.id.as_deref()?);
            let doi = product.doi.as_deref()?;
            if current == Some(id) {
                return None;
            }
            Some(
                TargetInternalReference::new(
                    Some(id.to_string()),
                    Some(strip_doi_prefix(doi).to_string()),
                )
                .with_context(ReferenceContext {
                    tab: OTHER_PUBLICATIONS_TAB.to_string(),
                    target_id: Some(target.clone()),
                }),
            )
        })
        .collect();
    out.sort_by(TargetInternalReference::cmp_by_value);
    out.dedup();
    (!out.is_empty()).then_some(out)
}
