//! Data model for the specimen hierarchy of a dataset search document.
//!
//! - **source**: studied specimen and states as delivered by the knowledge graph query
//! - **reference** / **payload**: the values and per-kind payloads written to the document
//! - **hierarchy**: the display tree, legend and translation result
//! - **overview**: aggregate statistics over all displayed specimen

pub mod error;
pub mod hierarchy;
pub mod ids;
pub mod overview;
pub mod payload;
pub mod quantity;
pub mod reference;
pub mod source;

pub use error::{ModelError, Result};
pub use hierarchy::{HierarchyIssue, HierarchyNode, Legend, RelationType, SpecimenHierarchy};
pub use ids::{NodeKey, instance_uuid};
pub use overview::SpecimenOverview;
pub use payload::{
    NodeData, SubjectData, SubjectGroupData, TissueSampleCollectionData, TissueSampleData,
};
pub use quantity::QuantitativeValueOrRange;
pub use reference::{ReferenceContext, TargetExternalReference, TargetInternalReference, Value};
pub use source::{
    AnatomicalLocation, FullNameRef, FullNameRefWithVersion, RelatedProducts, SpeciesOrStrain,
    SpecimenServiceLink, SpecimenServiceLinkCollection, StudiedSpecimen, StudiedState,
};
