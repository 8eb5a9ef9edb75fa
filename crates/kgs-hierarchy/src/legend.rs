use kgs_model::{HierarchyNode, Legend};

use crate::kind::KindTable;

/// Color legend of the kinds present in a tree, ordered by label.
///
/// Colors that belong to no kind, such as the root's, are left out.
pub fn build_legend(root: &HierarchyNode, kinds: &KindTable) -> Legend {
    let mut entries: Vec<(String, String)> = Vec::new();
    // descends below colorless nodes, e.g. unclassified states, instead of stopping there
    for color in root.walk().into_iter().filter_map(|n| n.color.as_deref()) {
        if entries.iter().any(|(c, _)| c == color) {
            continue;
        }
        if let Some(label) = kinds.find_label_for_color(color) {
            entries.push((color.to_string(), label));
        }
    }
    entries.sort_by(|a, b| a.1.cmp(&b.1));
    entries.dedup_by(|a, b| a.1 == b.1);
    Legend::from_entries(entries)
}
