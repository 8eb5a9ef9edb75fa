//! Loading query results and options, and rendering the translated document.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use kgs_hierarchy::{HierarchyOptions, translate_to_hierarchy};
use kgs_model::{SpecimenHierarchy, StudiedSpecimen};
use tracing::debug;

/// Read a JSON list of studied specimen.
pub fn read_specimens(path: &Path) -> Result<Vec<StudiedSpecimen>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("read specimen list {}", path.display()))?;
    let specimens = StudiedSpecimen::from_json_list(&json)
        .with_context(|| format!("parse specimen list {}", path.display()))?;
    debug!(path = %path.display(), specimens = specimens.len(), "loaded specimen list");
    Ok(specimens)
}

/// Options from an optional JSON file, with the dataset version applied on top.
pub fn load_options(path: Option<&Path>, dataset_version: Option<&str>) -> Result<HierarchyOptions> {
    let mut options = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("read options {}", path.display()))?;
            HierarchyOptions::from_json(&json)
                .with_context(|| format!("parse options {}", path.display()))?
        }
        None => HierarchyOptions::default(),
    };
    if let Some(id) = dataset_version {
        options = options.with_dataset_version(id);
    }
    Ok(options)
}

/// Parse and translate a specimen list given as JSON.
pub fn translate_json(json: &str, options: &HierarchyOptions) -> Result<Option<SpecimenHierarchy>> {
    let specimens = StudiedSpecimen::from_json_list(json).context("parse specimen list")?;
    Ok(translate_to_hierarchy(&specimens, options))
}

/// Render the document; an empty specimen list renders as `null`.
pub fn render_document(result: Option<&SpecimenHierarchy>, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    };
    rendered.context("serialize specimen hierarchy")
}
