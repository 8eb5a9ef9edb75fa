use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::kind::KindTable;

pub const DEFAULT_ROOT_TITLE: &str = "Specimen";
pub const DEFAULT_ROOT_COLOR: &str = "#e3dcdc";

/// Settings for one hierarchy translation.
///
/// Every field has a default, so a partial JSON document is enough to override
/// individual values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HierarchyOptions {
    /// Id of the record being translated. Related products with this id are not listed as
    /// other publications of its specimen.
    pub dataset_version_id: Option<String>,

    /// Title of the synthetic root node.
    pub root_title: String,

    /// Color of the synthetic root node.
    pub root_color: String,

    pub kinds: KindTable,
}

impl Default for HierarchyOptions {
    fn default() -> Self {
        Self {
            dataset_version_id: None,
            root_title: DEFAULT_ROOT_TITLE.to_string(),
            root_color: DEFAULT_ROOT_COLOR.to_string(),
            kinds: KindTable::default(),
        }
    }
}

impl HierarchyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON and validate the kind table.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.kinds.validate()?;
        Ok(options)
    }

    pub fn with_dataset_version(mut self, id: impl Into<String>) -> Self {
        self.dataset_version_id = Some(id.into());
        self
    }

    pub fn with_root(mut self, title: impl Into<String>, color: impl Into<String>) -> Self {
        self.root_title = title.into();
        self.root_color = color.into();
        self
    }

    pub fn with_kinds(mut self, kinds: KindTable) -> Self {
        self.kinds = kinds;
        self
    }

    pub(crate) fn dataset_version_id(&self) -> Option<&str> {
        self.dataset_version_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HierarchyError;
    use crate::kind::SpecimenKind;

    #[test]
    fn partial_json_keeps_defaults() {
        let options = HierarchyOptions::from_json(r#"{"datasetVersionId": "dsv-1"}"#).unwrap();
        assert_eq!(options.dataset_version_id.as_deref(), Some("dsv-1"));
        assert_eq!(options.root_title, DEFAULT_ROOT_TITLE);
        assert_eq!(options.kinds, KindTable::default());
    }

    #[test]
    fn kind_table_round_trips_through_json() {
        let json = serde_json::to_string(&HierarchyOptions::default()).unwrap();
        let options = HierarchyOptions::from_json(&json).unwrap();
        assert_eq!(
            options.kinds.entry(SpecimenKind::TissueSample).unwrap().specimen_color,
            "#3176e1"
        );
    }

    #[test]
    fn incomplete_kind_table_is_rejected() {
        let err = HierarchyOptions::from_json(r#"{"kinds": []}"#).unwrap_err();
        assert!(matches!(err, HierarchyError::MissingKind("Subject")));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = HierarchyOptions::from_json("{").unwrap_err();
        assert!(matches!(err, HierarchyError::InvalidOptions(_)));
    }
}
