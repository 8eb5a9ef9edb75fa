//! Rollup of specimen characteristics collected while the tree is built.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use kgs_model::{SpecimenOverview, TargetInternalReference, Value};

use crate::kind::SpecimenKind;
use crate::labels::uncapitalize;

/// A characteristic counted per specimen kind in the overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Characteristic {
    Sex,
    Species,
    Strains,
    GeneticStrainTypes,
    Pathology,
}

/// source ids per kind prefix
type CountsByPrefix = BTreeMap<String, BTreeSet<String>>;

/// Mutable accumulator for one translation, consumed by [`OverviewAggregator::flush`].
#[derive(Debug, Default)]
pub struct OverviewAggregator {
    ids: BTreeMap<SpecimenKind, BTreeSet<String>>,
    collected: HashMap<Characteristic, HashMap<TargetInternalReference, CountsByPrefix>>,
    anatomical_locations: Vec<TargetInternalReference>,
}

impl OverviewAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_specimen_id(&mut self, kind: SpecimenKind, id: &str) {
        self.ids.entry(kind).or_default().insert(id.to_string());
    }

    /// Record that specimen `source_id` of the kind labelled `prefix` has `references`.
    pub fn add(
        &mut self,
        characteristic: Characteristic,
        source_id: &str,
        references: Option<&[TargetInternalReference]>,
        prefix: &str,
    ) {
        let Some(references) = references else {
            return;
        };
        let by_reference = self.collected.entry(characteristic).or_default();
        for reference in references {
            let key =
                TargetInternalReference::new(reference.reference.clone(), reference.value.clone());
            by_reference
                .entry(key)
                .or_default()
                .entry(prefix.to_string())
                .or_default()
                .insert(source_id.to_string());
        }
    }

    pub fn add_sex(
        &mut self,
        source_id: &str,
        refs: Option<&[TargetInternalReference]>,
        prefix: &str,
    ) {
        self.add(Characteristic::Sex, source_id, refs, prefix);
    }

    pub fn add_species(
        &mut self,
        source_id: &str,
        refs: Option<&[TargetInternalReference]>,
        prefix: &str,
    ) {
        self.add(Characteristic::Species, source_id, refs, prefix);
    }

    pub fn add_strains(
        &mut self,
        source_id: &str,
        refs: Option<&[TargetInternalReference]>,
        prefix: &str,
    ) {
        self.add(Characteristic::Strains, source_id, refs, prefix);
    }

    pub fn add_genetic_strain_types(
        &mut self,
        source_id: &str,
        refs: Option<&[TargetInternalReference]>,
        prefix: &str,
    ) {
        self.add(Characteristic::GeneticStrainTypes, source_id, refs, prefix);
    }

    pub fn add_pathology(
        &mut self,
        source_id: &str,
        refs: Option<&[TargetInternalReference]>,
        prefix: &str,
    ) {
        self.add(Characteristic::Pathology, source_id, refs, prefix);
    }

    pub fn add_anatomical_locations(&mut self, refs: Option<&[TargetInternalReference]>) {
        for reference in refs.unwrap_or_default() {
            if !self.anatomical_locations.contains(reference) {
                self.anatomical_locations.push(reference.clone());
            }
        }
    }

    fn count(&self, kind: SpecimenKind) -> Option<Value<String>> {
        let n = self.ids.get(&kind).map_or(0, BTreeSet::len);
        (n > 0).then(|| Value::new(n.to_string()))
    }

    fn flush_characteristic(
        &self,
        characteristic: Characteristic,
    ) -> Option<Vec<TargetInternalReference>> {
        let by_reference = self.collected.get(&characteristic)?;
        let mut seen = HashSet::new();
        let mut result: Vec<TargetInternalReference> = by_reference
            .iter()
            .map(|(reference, counts)| {
                let mut entry = reference.clone();
                entry.count = Some(
                    counts
                        .iter()
                        .map(|(prefix, ids)| {
                            format!("{} {}", ids.len(), count_noun(prefix, ids.len() > 1))
                        })
                        .collect(),
                );
                entry
            })
            .filter(|r| seen.insert(r.clone()))
            .collect();
        result.sort_by(|a, b| {
            a.cmp_by_value(b)
                .then_with(|| a.value.cmp(&b.value))
                .then_with(|| a.reference.cmp(&b.reference))
        });
        (!result.is_empty()).then_some(result)
    }

    /// Produce the summary snapshot.
    pub fn flush(mut self) -> SpecimenOverview {
        let mut anatomical = std::mem::take(&mut self.anatomical_locations);
        anatomical.sort_by(TargetInternalReference::cmp_by_value);
        SpecimenOverview {
            number_of_subjects: self.count(SpecimenKind::Subject),
            number_of_subject_groups: self.count(SpecimenKind::SubjectGroup),
            number_of_tissue_samples: self.count(SpecimenKind::TissueSample),
            number_of_tissue_sample_collections: self
                .count(SpecimenKind::TissueSampleCollection),
            species: self.flush_characteristic(Characteristic::Species),
            sex: self.flush_characteristic(Characteristic::Sex),
            strains: self.flush_characteristic(Characteristic::Strains),
            genetic_strain_types: self.flush_characteristic(Characteristic::GeneticStrainTypes),
            pathology: self.flush_characteristic(Characteristic::Pathology),
            anatomical_locations_of_tissue_samples: anatomical,
            subject_ids: self.ids_of(SpecimenKind::Subject),
            subject_group_ids: self.ids_of(SpecimenKind::SubjectGroup),
            tissue_sample_ids: self.ids_of(SpecimenKind::TissueSample),
            tissue_sample_collection_ids: self.ids_of(SpecimenKind::TissueSampleCollection),
            ..SpecimenOverview::default()
        }
    }

    fn ids_of(&self, kind: SpecimenKind) -> BTreeSet<String> {
        self.ids.get(&kind).cloned().unwrap_or_default()
    }
}

/// `"Tissue sample"` becomes `"tissue sample"`, or `"tissue samples"` for a plural.
fn count_noun(prefix: &str, plural: bool) -> String {
    let noun = uncapitalize(prefix);
    if plural && !noun.ends_with('s') {
        format!("{noun}s")
    } else {
        noun
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(id: &str, name: &str) -> TargetInternalReference {
        TargetInternalReference::new(Some(id.to_string()), Some(name.to_string()))
    }

    #[test]
    fn counts_are_per_prefix_and_distinct_ids() {
        let mut agg = OverviewAggregator::new();
        let male = [r("m", "male")];
        agg.add_sex("s1", Some(&male[..]), "Subject");
        agg.add_sex("s2", Some(&male[..]), "Subject");
        agg.add_sex("s2", Some(&male[..]), "Subject");
        agg.add_sex("t1", Some(&male[..]), "Tissue sample");

        let overview = agg.flush();
        let sex = overview.sex.unwrap();
        assert_eq!(sex.len(), 1);
        assert_eq!(
            sex[0].count.as_deref().unwrap(),
            ["2 subjects", "1 tissue sample"]
        );
    }

    #[test]
    fn references_sorted_case_insensitively() {
        let mut agg = OverviewAggregator::new();
        let species = [r("b", "rattus"), r("a", "Mus musculus")];
        agg.add_species("s1", Some(&species[..]), "Subject");
        let species = agg.flush().species.unwrap();
        let values: Vec<_> = species.iter().map(|s| s.value.as_deref().unwrap()).collect();
        assert_eq!(values, ["Mus musculus", "rattus"]);
    }

    #[test]
    fn empty_aggregate_has_no_counts() {
        let overview = OverviewAggregator::new().flush();
        assert!(overview.number_of_subjects.is_none());
        assert!(overview.species.is_none());
        assert_eq!(overview.type_name.as_str(), "Dataset.SpecimenOverview");
    }

    #[test]
    fn kind_counts_and_ids() {
        let mut agg = OverviewAggregator::new();
        agg.add_specimen_id(SpecimenKind::Subject, "s1");
        agg.add_specimen_id(SpecimenKind::Subject, "s1");
        agg.add_specimen_id(SpecimenKind::TissueSample, "t1");
        let overview = agg.flush();
        assert_eq!(overview.number_of_subjects.as_ref().unwrap().as_str(), "1");
        assert_eq!(overview.number_of_tissue_samples.as_ref().unwrap().as_str(), "1");
        assert!(overview.number_of_subject_groups.is_none());
        assert_eq!(overview.all_specimen_ids(), ["s1", "t1"]);
    }

    #[test]
    fn plural_keeps_trailing_s() {
        assert_eq!(count_noun("Subject group", true), "subject groups");
        assert_eq!(count_noun("Series", true), "series");
        assert_eq!(count_noun("Subject", false), "subject");
    }
}
