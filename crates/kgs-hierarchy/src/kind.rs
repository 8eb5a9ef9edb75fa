//! Specimen kinds and the table that classifies records into them.
//!
//! A record is classified by testing its declared types against each entry of the
//! [`KindTable`] in order; the first entry whose type string is declared wins.

use std::collections::HashSet;
use std::fmt;

use kgs_model::{StudiedSpecimen, StudiedState};
use serde::{Deserialize, Serialize};

use crate::error::{HierarchyError, Result};

/// The four kinds of studied specimen shown in a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecimenKind {
    Subject,
    SubjectGroup,
    TissueSample,
    TissueSampleCollection,
}

impl SpecimenKind {
    /// All kinds in classification order.
    pub const ALL: [SpecimenKind; 4] = [
        SpecimenKind::Subject,
        SpecimenKind::SubjectGroup,
        SpecimenKind::TissueSample,
        SpecimenKind::TissueSampleCollection,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpecimenKind::Subject => "Subject",
            SpecimenKind::SubjectGroup => "SubjectGroup",
            SpecimenKind::TissueSample => "TissueSample",
            SpecimenKind::TissueSampleCollection => "TissueSampleCollection",
        }
    }

    /// Document type of a specimen payload, e.g. `Dataset.Subject`.
    pub fn document_type(&self) -> String {
        format!("Dataset.{}", self.name())
    }

    /// Document type of a state payload, e.g. `Dataset.SubjectState`.
    pub fn state_document_type(&self) -> String {
        format!("Dataset.{}State", self.name())
    }
}

impl fmt::Display for SpecimenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type strings, colors and display prefix of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindEntry {
    pub kind: SpecimenKind,
    pub prefix: String,
    pub specimen_type: String,
    pub specimen_color: String,
    pub state_type: String,
    pub state_color: String,
}

impl KindEntry {
    pub fn new(
        kind: SpecimenKind,
        prefix: &str,
        specimen_type: &str,
        specimen_color: &str,
        state_type: &str,
        state_color: &str,
    ) -> Self {
        Self {
            kind,
            prefix: prefix.to_string(),
            specimen_type: specimen_type.to_string(),
            specimen_color: specimen_color.to_string(),
            state_type: state_type.to_string(),
            state_color: state_color.to_string(),
        }
    }

    /// `"{prefix} {internal identifier or lookup label}"`.
    pub fn label(&self, specimen: &StudiedSpecimen) -> String {
        let name = specimen
            .internal_identifier()
            .or(specimen.lookup_label.as_deref())
            .unwrap_or_default();
        format!("{} {}", self.prefix, name).trim_end().to_string()
    }

    pub fn matches_specimen(&self, specimen: &StudiedSpecimen) -> bool {
        specimen.has_type(&self.specimen_type)
    }

    pub fn matches_state(&self, state: &StudiedState) -> bool {
        state.has_type(&self.state_type)
    }
}

/// Ordered classification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindTable {
    entries: Vec<KindEntry>,
}

impl Default for KindTable {
    fn default() -> Self {
        Self {
            entries: vec![
                KindEntry::new(
                    SpecimenKind::Subject,
                    "Subject",
                    "https://openminds.ebrains.eu/core/Subject",
                    "#ffbe00",
                    "https://openminds.ebrains.eu/core/SubjectState",
                    "#e68d0d",
                ),
                KindEntry::new(
                    SpecimenKind::SubjectGroup,
                    "Subject group",
                    "https://openminds.ebrains.eu/core/SubjectGroup",
                    "#8a1f0d",
                    "https://openminds.ebrains.eu/core/SubjectGroupState",
                    "#8a1f0d",
                ),
                KindEntry::new(
                    SpecimenKind::TissueSample,
                    "Tissue sample",
                    "https://openminds.ebrains.eu/core/TissueSample",
                    "#3176e1",
                    "https://openminds.ebrains.eu/core/TissueSampleState",
                    "#393ac6",
                ),
                KindEntry::new(
                    SpecimenKind::TissueSampleCollection,
                    "Tissue sample collection",
                    "https://openminds.ebrains.eu/core/TissueSampleCollection",
                    "#78b5b5",
                    "https://openminds.ebrains.eu/core/TissueSampleCollectionState",
                    "#497d7d",
                ),
            ],
        }
    }
}

impl KindTable {
    pub fn new(entries: Vec<KindEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[KindEntry] {
        &self.entries
    }

    pub fn entry(&self, kind: SpecimenKind) -> Option<&KindEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Every kind must be present once, and no type string may be claimed twice.
    pub fn validate(&self) -> Result<()> {
        for kind in SpecimenKind::ALL {
            if self.entry(kind).is_none() {
                return Err(HierarchyError::MissingKind(kind.name()));
            }
        }
        let mut kinds = HashSet::new();
        let mut types = HashSet::new();
        for entry in &self.entries {
            if !kinds.insert(entry.kind) {
                return Err(HierarchyError::DuplicateKindValue {
                    field: "kind",
                    value: entry.kind.name().to_string(),
                });
            }
            for value in [&entry.specimen_type, &entry.state_type] {
                if !types.insert(value.as_str()) {
                    return Err(HierarchyError::DuplicateKindValue {
                        field: "type",
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn classify_specimen(&self, specimen: &StudiedSpecimen) -> Option<&KindEntry> {
        self.entries.iter().find(|e| e.matches_specimen(specimen))
    }

    /// Classify a state by its own declared type, falling back to its owner's kind.
    pub fn classify_state(
        &self,
        state: &StudiedState,
        owner: &StudiedSpecimen,
    ) -> Option<&KindEntry> {
        self.entries
            .iter()
            .find(|e| e.matches_state(state))
            .or_else(|| self.classify_specimen(owner))
    }

    /// Display label of a specimen, `None` when it matches no kind.
    pub fn label(&self, specimen: &StudiedSpecimen) -> Option<String> {
        self.classify_specimen(specimen).map(|e| e.label(specimen))
    }

    /// Legend label for a node color.
    ///
    /// The first entry using the color decides; its specimen color takes precedence over its
    /// state color.
    pub fn find_label_for_color(&self, color: &str) -> Option<String> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.specimen_color == color || e.state_color == color)?;
        if entry.specimen_color == color {
            Some(entry.prefix.clone())
        } else {
            Some(format!("{} state", entry.prefix))
        }
    }
}
