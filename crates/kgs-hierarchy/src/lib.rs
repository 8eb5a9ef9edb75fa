//! Specimen hierarchy resolution for dataset search documents.
//!
//! This crate turns the flat list of studied specimen of a dataset version into the
//! display tree shown in its specimen section:
//!
//! - **relations**: working set expansion and the pruned `isPartOf`/`descendedFrom` indexes
//! - **kind**: classification of records into subjects, groups, samples and collections
//! - **classify**: per-kind payload translation
//! - **builder**: cycle-safe tree construction with single-state merging
//! - **overview** / **legend**: summaries computed alongside the tree

pub mod builder;
pub mod classify;
pub mod error;
pub mod kind;
pub mod labels;
pub mod legend;
pub mod options;
pub mod overview;
pub mod relations;

pub use builder::HierarchyBuilder;
pub use error::{HierarchyError, Result};
pub use kind::{KindEntry, KindTable, SpecimenKind};
pub use labels::state_label;
pub use legend::build_legend;
pub use options::HierarchyOptions;
pub use overview::OverviewAggregator;
pub use relations::SpecimenGraph;

use kgs_model::{SpecimenHierarchy, StudiedSpecimen};
use tracing::{info, info_span};

/// Translate the studied specimen of one record into its hierarchy, legend and overview.
///
/// Returns `None` when there are no specimen. Cycles never fail the translation; they are
/// reported as issues on the result.
pub fn translate_to_hierarchy(
    specimens: &[StudiedSpecimen],
    options: &HierarchyOptions,
) -> Option<SpecimenHierarchy> {
    if specimens.is_empty() {
        return None;
    }
    let _span = info_span!("specimen_hierarchy", specimens = specimens.len()).entered();
    let graph = SpecimenGraph::resolve(specimens);
    let result = HierarchyBuilder::new(&graph, options).build();
    info!(
        nodes = result.hierarchy.node_count(),
        issues = result.issues.len(),
        "built specimen hierarchy"
    );
    Some(result)
}
