//! End-to-end tests for specimen hierarchy translation.

use kgs_hierarchy::{HierarchyOptions, SpecimenGraph, translate_to_hierarchy};
use kgs_model::{
    FullNameRef, HierarchyNode, NodeData, RelationType, SpeciesOrStrain, SpecimenHierarchy,
    StudiedSpecimen, StudiedState,
};
use proptest::prelude::*;

const SUBJECT: &str = "https://openminds.ebrains.eu/core/Subject";
const SUBJECT_GROUP: &str = "https://openminds.ebrains.eu/core/SubjectGroup";
const TISSUE_SAMPLE: &str = "https://openminds.ebrains.eu/core/TissueSample";
const TISSUE_SAMPLE_COLLECTION: &str = "https://openminds.ebrains.eu/core/TissueSampleCollection";

const SPECIMEN_TYPES: [&str; 4] = [SUBJECT, SUBJECT_GROUP, TISSUE_SAMPLE, TISSUE_SAMPLE_COLLECTION];
const STATE_TYPES: [&str; 4] = [
    "https://openminds.ebrains.eu/core/SubjectState",
    "https://openminds.ebrains.eu/core/SubjectGroupState",
    "https://openminds.ebrains.eu/core/TissueSampleState",
    "https://openminds.ebrains.eu/core/TissueSampleCollectionState",
];

fn specimen(id: &str, specimen_type: &str) -> StudiedSpecimen {
    let mut s = StudiedSpecimen::new(format!("https://kg.ebrains.eu/api/instances/{id}"), specimen_type);
    s.internal_identifier = Some(id.to_string());
    s
}

fn part_of(mut s: StudiedSpecimen, parent: &str) -> StudiedSpecimen {
    s.is_part_of
        .push(format!("https://kg.ebrains.eu/api/instances/{parent}"));
    s
}

fn translate(input: &[StudiedSpecimen]) -> SpecimenHierarchy {
    translate_to_hierarchy(input, &HierarchyOptions::default()).expect("hierarchy")
}

fn titles(nodes: &[HierarchyNode]) -> Vec<&str> {
    nodes.iter().filter_map(|n| n.title.as_deref()).collect()
}

#[test]
fn empty_input_has_no_hierarchy() {
    assert!(translate_to_hierarchy(&[], &HierarchyOptions::default()).is_none());
}

#[test]
fn unrelated_subjects_are_sorted_under_the_root() {
    let result = translate(&[specimen("sub-02", SUBJECT), specimen("sub-01", SUBJECT)]);
    let root = &result.hierarchy;
    assert_eq!(root.title.as_deref(), Some("Specimen"));
    assert_eq!(root.color.as_deref(), Some("#e3dcdc"));
    assert_eq!(titles(&root.children), ["Subject sub-01", "Subject sub-02"]);
    assert!(root.children.iter().all(|c| c.parent_relation_type.is_none()));
}

#[test]
fn partially_used_group_reports_member_count() {
    let mut group = specimen("controls", SUBJECT_GROUP);
    group.number_of_subjects = Some(5);
    group.sub_elements = (1..=5)
        .map(|i| part_of(specimen(&format!("sub-0{i}"), SUBJECT), "controls"))
        .collect();
    let input = vec![
        group,
        part_of(specimen("sub-01", SUBJECT), "controls"),
        part_of(specimen("sub-02", SUBJECT), "controls"),
        part_of(specimen("sub-03", SUBJECT), "controls"),
    ];

    let result = translate(&input);
    let group = &result.hierarchy.children[0];
    assert_eq!(
        titles(&group.children),
        ["Subject sub-01", "Subject sub-02", "Subject sub-03"]
    );
    assert!(
        group
            .children
            .iter()
            .all(|c| c.parent_relation_type == Some(RelationType::PartOf))
    );
    let Some(NodeData::SubjectGroup(data)) = &group.data else {
        panic!("expected a subject group payload");
    };
    assert_eq!(
        data.number_of_subjects.as_ref().unwrap().as_str(),
        "3 of 5 used in this dataset"
    );
}

#[test]
fn group_without_explicit_members_shows_all_sub_elements() {
    let mut group = specimen("controls", SUBJECT_GROUP);
    group.number_of_subjects = Some(2);
    group.sub_elements = vec![
        part_of(specimen("sub-02", SUBJECT), "controls"),
        part_of(specimen("sub-01", SUBJECT), "controls"),
    ];

    let result = translate(&[group]);
    let group = &result.hierarchy.children[0];
    assert_eq!(titles(&group.children), ["Subject sub-01", "Subject sub-02"]);
    let Some(NodeData::SubjectGroup(data)) = &group.data else {
        panic!("expected a subject group payload");
    };
    assert_eq!(data.number_of_subjects.as_ref().unwrap().as_str(), "2");
    assert_eq!(result.overview.number_of_subjects.as_ref().unwrap().as_str(), "2");
}

#[test]
fn collection_reports_total_and_used_samples() {
    let mut collection = specimen("slices", TISSUE_SAMPLE_COLLECTION);
    collection.number_of_tissue_samples = Some(10);
    let mut input = vec![collection];
    input.extend((1..=4).map(|i| part_of(specimen(&format!("slice-{i}"), TISSUE_SAMPLE), "slices")));

    let result = translate(&input);
    let collection = &result.hierarchy.children[0];
    assert_eq!(collection.children.len(), 4);
    let Some(NodeData::TissueSampleCollection(data)) = &collection.data else {
        panic!("expected a tissue sample collection payload");
    };
    assert_eq!(
        data.tissue_samples.as_ref().unwrap().as_str(),
        "total: 10, used in this dataset: 4"
    );
    assert_eq!(
        result.legend.labels(),
        ["Tissue sample", "Tissue sample collection"]
    );
}

#[test]
fn single_state_specimen_is_one_node() {
    let mut subject = specimen("sub-01", SUBJECT);
    let mut state = StudiedState::new("https://kg.ebrains.eu/api/instances/st-1", STATE_TYPES[0]);
    state.age_category = vec![FullNameRef::new("https://kg/adult", "adult")];
    subject.studied_state = vec![state];

    let result = translate(&[subject]);
    assert_eq!(result.hierarchy.node_count(), 2);
    let node = &result.hierarchy.children[0];
    assert_eq!(node.color.as_deref(), Some("#ffbe00"));
    let Some(NodeData::Subject(data)) = &node.data else {
        panic!("expected a subject payload");
    };
    assert_eq!(data.type_name.as_str(), "Dataset.Subject");
    assert_eq!(data.age_category.as_ref().unwrap()[0].value.as_deref(), Some("adult"));
}

#[test]
fn enclosed_sample_appears_once_below_its_source_state() {
    let mut subject = specimen("sub-01", SUBJECT);
    subject.studied_state = vec![
        StudiedState::new("https://kg/st-a", STATE_TYPES[0]),
        StudiedState::new("https://kg/st-b", STATE_TYPES[0]),
    ];
    let mut sample = specimen("slice-1", TISSUE_SAMPLE);
    let mut first = StudiedState::new("https://kg/ts-1", STATE_TYPES[2]);
    first.descended_from = vec!["https://kg/st-b".to_string()];
    let mut second = StudiedState::new("https://kg/ts-2", STATE_TYPES[2]);
    second.descended_from = vec!["https://kg/ts-1".to_string()];
    sample.studied_state = vec![first, second];

    let result = translate(&[subject, sample]);
    let subject = &result.hierarchy.children[0];
    assert_eq!(titles(&result.hierarchy.children), ["Subject sub-01"]);
    assert_eq!(titles(&subject.children), ["State A", "State B"]);
    let b = &subject.children[1];
    assert_eq!(titles(&b.children), ["Tissue sample slice-1"]);
    assert_eq!(
        b.children[0].parent_relation_type,
        Some(RelationType::DescendentFrom)
    );
    let sample_nodes = result
        .hierarchy
        .walk()
        .into_iter()
        .filter(|n| n.title.as_deref() == Some("Tissue sample slice-1"))
        .count();
    assert_eq!(sample_nodes, 1);
    assert_eq!(
        result.legend.labels(),
        ["Subject", "Subject state", "Tissue sample", "Tissue sample state"]
    );
}

#[test]
fn cycles_are_reported_without_failing() {
    let group = specimen("g", SUBJECT_GROUP);
    let a = part_of(part_of(specimen("a", SUBJECT), "g"), "b");
    let b = part_of(specimen("b", SUBJECT), "a");

    let result = translate(&[group, a, b]);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(
        result.issues[0].message,
        "Circular reference detected - breaking at instance a"
    );
    assert_eq!(result.hierarchy.node_count(), 4);
}

#[test]
fn overview_counts_species_and_sex() {
    let mouse = SpeciesOrStrain {
        id: Some("https://kg/mouse".to_string()),
        full_name: Some("Mus musculus".to_string()),
        ..SpeciesOrStrain::default()
    };
    let mut first = specimen("sub-01", SUBJECT);
    first.species = vec![mouse.clone()];
    first.biological_sex = vec![FullNameRef::new("https://kg/female", "female")];
    let mut second = specimen("sub-02", SUBJECT);
    second.species = vec![mouse];

    let result = translate(&[first, second]);
    insta::assert_json_snapshot!(result.overview, @r#"
    {
      "type": {
        "value": "Dataset.SpecimenOverview"
      },
      "numberOfSubjects": {
        "value": "2"
      },
      "species": [
        {
          "reference": "mouse",
          "value": "Mus musculus",
          "count": [
            "2 subjects"
          ]
        }
      ],
      "sex": [
        {
          "reference": "female",
          "value": "female",
          "count": [
            "1 subject"
          ]
        }
      ]
    }
    "#);
    assert_eq!(result.overview.all_specimen_ids(), ["sub-01", "sub-02"]);
}

#[test]
fn dataset_version_is_not_listed_as_other_publication() {
    let mut subject = specimen("sub-01", SUBJECT);
    subject.used_in_datasets = vec![
        kgs_model::RelatedProducts {
            id: Some("https://kg/dsv-1".to_string()),
            doi: Some("https://doi.org/10.25493/AAAA".to_string()),
            groups_with_individual_sub_element_specification: Vec::new(),
        },
        kgs_model::RelatedProducts {
            id: Some("https://kg/dsv-2".to_string()),
            doi: Some("https://doi.org/10.25493/BBBB".to_string()),
            groups_with_individual_sub_element_specification: Vec::new(),
        },
    ];
    let options = HierarchyOptions::default().with_dataset_version("dsv-1");

    let result = translate_to_hierarchy(&[subject], &options).expect("hierarchy");
    let Some(NodeData::Subject(data)) = &result.hierarchy.children[0].data else {
        panic!("expected a subject payload");
    };
    let publications = data.other_publications.as_ref().unwrap();
    assert_eq!(publications.len(), 1);
    assert_eq!(publications[0].value.as_deref(), Some("10.25493/BBBB"));
    assert_eq!(publications[0].reference.as_deref(), Some("dsv-2"));
}

#[test]
fn custom_root_is_used() {
    let options = HierarchyOptions::default().with_root("Specimens", "#000000");
    let result = translate_to_hierarchy(&[specimen("sub-01", SUBJECT)], &options).unwrap();
    assert_eq!(result.hierarchy.title.as_deref(), Some("Specimens"));
    assert_eq!(result.legend.get("#000000"), None);
}

fn specimen_set() -> impl Strategy<Value = Vec<StudiedSpecimen>> {
    let raw_specimen = (
        0..4usize,
        prop::option::of(0..6usize),
        prop::collection::vec(prop::option::of((0..6usize, 0..3usize)), 0..3),
    );
    prop::collection::vec(raw_specimen, 1..6).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (kind, parent, states))| {
                let mut s = StudiedSpecimen::new(format!("s{i}"), SPECIMEN_TYPES[kind]);
                s.internal_identifier = Some(format!("s{i}"));
                s.is_part_of = parent.map(|p| format!("s{p}")).into_iter().collect();
                s.studied_state = states
                    .into_iter()
                    .enumerate()
                    .map(|(j, from)| {
                        let mut st = StudiedState::new(format!("s{i}-{j}"), STATE_TYPES[kind]);
                        st.descended_from =
                            from.map(|(a, b)| format!("s{a}-{b}")).into_iter().collect();
                        st
                    })
                    .collect();
                s
            })
            .collect()
    })
}

fn children_sorted(node: &HierarchyNode) -> bool {
    node.children.windows(2).all(|w| w[0].title <= w[1].title)
        && node.children.iter().all(children_sorted)
}

proptest! {
    #[test]
    fn translation_terminates_and_sorts_children(input in specimen_set()) {
        let result = translate(&input);
        prop_assert!(children_sorted(&result.hierarchy));
        for issue in &result.issues {
            prop_assert!(issue.message.starts_with("Circular reference detected"));
        }
    }

    #[test]
    fn translation_is_deterministic(input in specimen_set()) {
        let first = translate(&input);
        let second = translate(&input);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn node_keys_are_unique(input in specimen_set()) {
        let result = translate(&input);
        let nodes = result.hierarchy.walk();
        let mut keys: Vec<_> = nodes.iter().map(|n| n.key).collect();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), nodes.len());
    }

    #[test]
    fn explicit_members_make_a_subselection(explicit in prop::collection::vec(any::<bool>(), 4)) {
        let mut group = StudiedSpecimen::new("g", SUBJECT_GROUP);
        group.sub_elements = (0..4)
            .map(|i| StudiedSpecimen::new(format!("m{i}"), SUBJECT))
            .collect();
        let mut input = vec![group.clone()];
        input.extend(
            group
                .sub_elements
                .iter()
                .zip(&explicit)
                .filter(|(_, keep)| **keep)
                .map(|(member, _)| member.clone()),
        );

        let graph = SpecimenGraph::resolve(&input);
        let ids: Vec<&str> = graph.working_set().map(|s| s.id.as_str()).collect();
        if explicit.iter().any(|keep| *keep) {
            prop_assert_eq!(ids.len(), input.len());
        } else {
            prop_assert_eq!(ids, ["g", "m0", "m1", "m2", "m3"]);
        }
    }
}
