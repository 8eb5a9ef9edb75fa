//! Tests for kgs-model types.

use kgs_model::{
    HierarchyIssue, Legend, ModelError, RelationType, StudiedSpecimen, TargetInternalReference,
};

const SUBJECT: &str = "https://openminds.ebrains.eu/core/Subject";

#[test]
fn parses_query_result_list() {
    let json = r#"[
        {
            "id": "https://kg.ebrains.eu/api/instances/s1",
            "type": ["https://openminds.ebrains.eu/core/Subject"],
            "internalIdentifier": "sub-01",
            "isPartOf": null,
            "species": [
                {
                    "id": "https://kg.ebrains.eu/api/instances/strain-1",
                    "fullName": "C57BL/6J",
                    "species": {"id": "https://kg.ebrains.eu/api/instances/mouse", "fullName": "Mus musculus"}
                }
            ],
            "studiedState": [
                {
                    "id": "https://kg.ebrains.eu/api/instances/st1",
                    "type": ["https://openminds.ebrains.eu/core/SubjectState"],
                    "descendedFrom": [],
                    "age": {"value": 12, "unit": {"fullName": "days"}}
                }
            ]
        }
    ]"#;

    let specimens = StudiedSpecimen::from_json_list(json).expect("parse specimen");
    assert_eq!(specimens.len(), 1);
    let subject = &specimens[0];
    assert!(subject.has_type(SUBJECT));
    assert_eq!(subject.internal_identifier(), Some("sub-01"));
    assert!(subject.is_part_of.is_empty());
    assert_eq!(subject.studied_state.len(), 1);
    assert_eq!(
        subject.studied_state[0]
            .age
            .as_ref()
            .map(|a| a.display_string())
            .as_deref(),
        Some("12 days")
    );
    assert_eq!(
        subject.species[0]
            .species
            .as_ref()
            .and_then(|s| s.full_name.as_deref()),
        Some("Mus musculus")
    );
}

#[test]
fn rejects_specimen_without_id() {
    let json = r#"[{"type": ["https://openminds.ebrains.eu/core/Subject"]}]"#;
    let err = StudiedSpecimen::from_json_list(json).unwrap_err();
    assert!(matches!(
        err,
        ModelError::MissingId {
            kind: "studied specimen",
            position: 0
        }
    ));
}

#[test]
fn rejects_malformed_json() {
    let err = StudiedSpecimen::from_json_list("{not json").unwrap_err();
    assert!(matches!(err, ModelError::Json(_)));
}

#[test]
fn blank_internal_identifier_is_absent() {
    let mut specimen = StudiedSpecimen::new("s1", SUBJECT);
    specimen.internal_identifier = Some("   ".to_string());
    assert_eq!(specimen.internal_identifier(), None);
}

#[test]
fn legend_serializes_in_insertion_order() {
    let legend = Legend::from_entries(vec![
        ("#ffbe00".to_string(), "Subject".to_string()),
        ("#e68d0d".to_string(), "Subject state".to_string()),
        ("#3176e1".to_string(), "Tissue sample".to_string()),
    ]);
    insta::assert_json_snapshot!(legend, @r###"
    {
      "#ffbe00": "Subject",
      "#e68d0d": "Subject state",
      "#3176e1": "Tissue sample"
    }
    "###);
    assert_eq!(legend.get("#e68d0d"), Some("Subject state"));
}

#[test]
fn relation_type_uses_document_names() {
    assert_eq!(
        serde_json::to_string(&RelationType::PartOf).expect("serialize"),
        "\"partOf\""
    );
    assert_eq!(
        serde_json::to_string(&RelationType::DescendentFrom).expect("serialize"),
        "\"descendentFrom\""
    );
}

#[test]
fn references_order_case_insensitively_with_missing_values_first() {
    let mut refs = vec![
        TargetInternalReference::new(None, Some("beta".to_string())),
        TargetInternalReference::new(None, None),
        TargetInternalReference::new(None, Some("Alpha".to_string())),
    ];
    refs.sort_by(TargetInternalReference::cmp_by_value);
    let values: Vec<Option<&str>> = refs.iter().map(|r| r.value.as_deref()).collect();
    assert_eq!(values, vec![None, Some("Alpha"), Some("beta")]);
}

#[test]
fn circular_reference_issue_message() {
    let issue = HierarchyIssue::circular_reference("abc");
    assert_eq!(
        issue.to_string(),
        "Circular reference detected - breaking at instance abc"
    );
}
