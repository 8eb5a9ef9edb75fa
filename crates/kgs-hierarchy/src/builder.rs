//! Top-down construction of the display tree.
//!
//! Specimen nodes and state nodes are built by two mutually recursive procedures. A stack of
//! the instance uuids on the current path guards against `isPartOf` and `descendedFrom`
//! cycles: re-entering an instance records an issue and drops that branch.

use kgs_model::{
    HierarchyIssue, HierarchyNode, NodeKey, RelationType, SpecimenHierarchy, instance_uuid,
};
use tracing::{debug, error, warn};

use crate::classify;
use crate::legend::build_legend;
use crate::labels::{full_state_title, state_label, state_title};
use crate::options::HierarchyOptions;
use crate::overview::OverviewAggregator;
use crate::relations::{SpecimenGraph, SpecimenIx, StateIx};

/// Builder state for one translation. Consumed by [`HierarchyBuilder::build`].
pub struct HierarchyBuilder<'a> {
    graph: &'a SpecimenGraph<'a>,
    options: &'a HierarchyOptions,
    guard: Vec<String>,
    aggregator: OverviewAggregator,
    issues: Vec<HierarchyIssue>,
    sequence: u64,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(graph: &'a SpecimenGraph<'a>, options: &'a HierarchyOptions) -> Self {
        Self {
            graph,
            options,
            guard: Vec::new(),
            aggregator: OverviewAggregator::new(),
            issues: Vec::new(),
            sequence: 0,
        }
    }

    /// Build the tree under a synthetic root, with its legend and overview.
    pub fn build(mut self) -> SpecimenHierarchy {
        let mut root = HierarchyNode::new(self.next_key("root"), None);
        root.title = Some(self.options.root_title.clone());
        root.color = Some(self.options.root_color.clone());

        let mut children: Vec<HierarchyNode> = self
            .graph
            .root_candidates()
            .into_iter()
            .filter_map(|ix| self.specimen_node(ix, false, None, None))
            .collect();
        children.sort_by(HierarchyNode::cmp_by_title);
        root.children = children;

        let legend = build_legend(&root, &self.options.kinds);
        SpecimenHierarchy {
            hierarchy: root,
            legend,
            overview: self.aggregator.flush(),
            issues: self.issues,
        }
    }

    fn next_key(&mut self, uuid: &str) -> NodeKey {
        let key = NodeKey::derive(uuid, self.sequence);
        self.sequence += 1;
        key
    }

    fn enter(&mut self, uuid: &str) -> bool {
        if self.guard.iter().any(|seen| seen == uuid) {
            let issue = HierarchyIssue::circular_reference(uuid);
            error!(instance = uuid, "{}", issue.message);
            self.issues.push(issue);
            return false;
        }
        self.guard.push(uuid.to_string());
        true
    }

    fn leave(&mut self) {
        self.guard.pop();
    }

    /// Node for a specimen.
    ///
    /// With `attach_root` the specimen is being placed above one of its own states, so its
    /// states are not expanded again. `parent` is the group the specimen was reached through.
    fn specimen_node(
        &mut self,
        ix: SpecimenIx,
        attach_root: bool,
        relation: Option<RelationType>,
        parent: Option<SpecimenIx>,
    ) -> Option<HierarchyNode> {
        let graph = self.graph;
        let options = self.options;
        let record = graph.specimen(ix).record;
        let uuid = instance_uuid(&record.id);
        if !self.enter(uuid) {
            return None;
        }
        debug!(specimen = %record.id, "translating specimen");

        let mut node = HierarchyNode::new(self.next_key(uuid), relation);
        let mut payload = match options.kinds.classify_specimen(record) {
            Some(entry) => {
                node.color = Some(entry.specimen_color.clone());
                node.title = Some(entry.label(record));
                let parent_record = parent.map(|p| graph.specimen(p).record);
                let data = classify::translate_specimen(entry, record, parent_record, options);
                classify::aggregate_overview(entry, &data, &mut self.aggregator);
                Some(data)
            }
            None => {
                warn!(specimen = %record.id, types = ?record.types, "unclassified specimen");
                None
            }
        };

        let mut children: Vec<HierarchyNode> = Vec::new();
        for &child in graph.part_of_children(ix) {
            if let Some(c) = self.specimen_node(child, false, Some(RelationType::PartOf), Some(ix)) {
                children.push(c);
            }
        }

        if !attach_root {
            if let [only] = graph.specimen(ix).states.as_slice() {
                if let Some(state) = self.state_node(*only, false, 0, RelationType::DescendentFrom)
                {
                    node = merge(node, state, &mut children);
                }
            } else {
                for (idx, st) in graph.root_states_of(ix).into_iter().enumerate() {
                    if let Some(c) = self.state_node(st, false, idx, RelationType::DescendentFrom) {
                        children.push(c);
                    }
                }
            }
        }

        children.sort_by(HierarchyNode::cmp_by_title);
        node.children = children;
        if let Some(data) = payload.as_mut() {
            classify::flush(data, &node.children);
        }
        node.data = payload;
        self.leave();
        Some(node)
    }

    /// Node for a state labelled by its position `order` among its siblings.
    ///
    /// With `attach_root` the state's own specimen is rendered with it: merged into one node
    /// when the specimen has a single state, otherwise nested below the state.
    fn state_node(
        &mut self,
        st: StateIx,
        attach_root: bool,
        order: usize,
        relation: RelationType,
    ) -> Option<HierarchyNode> {
        let graph = self.graph;
        let options = self.options;
        let resolved = graph.state(st);
        let state = resolved.record;
        let owner_ix = resolved.owner;
        let owner = graph.specimen(owner_ix).record;
        let uuid = instance_uuid(&state.id);
        if !self.enter(uuid) {
            return None;
        }

        let mut node = HierarchyNode::new(self.next_key(uuid), Some(relation));
        let letter = state_label(order);
        match options.kinds.classify_state(state, owner) {
            Some(entry) => {
                node.color = Some(entry.state_color.clone());
                let owner_label = entry.label(owner);
                node.title = Some(if attach_root && !owner_label.trim().is_empty() {
                    full_state_title(&letter, owner.internal_identifier().unwrap_or(&owner_label))
                } else {
                    state_title(&letter)
                });
                node.data = Some(classify::translate_state(
                    entry, state, owner, &letter, options,
                ));
            }
            None => warn!(state = %state.id, "unclassified state"),
        }

        let mut children: Vec<HierarchyNode> = Vec::new();
        let descendants = graph.descendants_of(st);
        // specimen entirely descended from this state hang directly below it
        let enclosed = graph.fully_enclosed(descendants);
        for &s in &enclosed {
            if let Some(c) =
                self.specimen_node(s, false, Some(RelationType::DescendentFrom), None)
            {
                children.push(c);
            }
        }
        let incomplete: Vec<StateIx> = descendants
            .iter()
            .copied()
            .filter(|&d| !enclosed.contains(&graph.state(d).owner))
            .collect();
        for (idx, d) in incomplete.into_iter().enumerate() {
            let same_owner = graph.state(d).owner == owner_ix;
            let child_order = if same_owner { idx + order + 1 } else { idx };
            if let Some(c) =
                self.state_node(d, !same_owner, child_order, RelationType::DescendentFrom)
            {
                children.push(c);
            }
        }

        if attach_root {
            if let Some(parent) = self.specimen_node(owner_ix, true, Some(RelationType::PartOf), None)
            {
                if graph.specimen(owner_ix).states.len() == 1 {
                    node = merge(parent, node, &mut children);
                } else {
                    children.push(parent);
                }
            }
        }

        children.sort_by(HierarchyNode::cmp_by_title);
        node.children = children;
        self.leave();
        Some(node)
    }
}

/// Collapse a specimen node and the node of its single state.
///
/// The result keeps the specimen's key, title, color, payload and relation. The children of
/// both are appended to `pending`, skipping keys already present; the caller attaches them.
fn merge(
    parent: HierarchyNode,
    child: HierarchyNode,
    pending: &mut Vec<HierarchyNode>,
) -> HierarchyNode {
    let HierarchyNode {
        key,
        title,
        color,
        parent_relation_type,
        children: parent_children,
        data,
    } = parent;
    for node in parent_children.into_iter().chain(child.children) {
        if !pending.iter().any(|p| p.key == node.key) {
            pending.push(node);
        }
    }
    HierarchyNode {
        key,
        title,
        color,
        parent_relation_type,
        children: Vec::new(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use kgs_model::{StudiedSpecimen, StudiedState};

    use super::*;

    const SUBJECT: &str = "https://openminds.ebrains.eu/core/Subject";
    const SUBJECT_STATE: &str = "https://openminds.ebrains.eu/core/SubjectState";
    const TISSUE_SAMPLE: &str = "https://openminds.ebrains.eu/core/TissueSample";
    const TISSUE_SAMPLE_STATE: &str = "https://openminds.ebrains.eu/core/TissueSampleState";

    fn state(id: &str, state_type: &str, from: &[&str]) -> StudiedState {
        let mut st = StudiedState::new(id, state_type);
        st.descended_from = from.iter().map(|f| f.to_string()).collect();
        st
    }

    fn specimen(id: &str, kind: &str, states: Vec<StudiedState>) -> StudiedSpecimen {
        let mut s = StudiedSpecimen::new(id, kind);
        s.internal_identifier = Some(id.to_string());
        s.studied_state = states;
        s
    }

    fn build(input: &[StudiedSpecimen]) -> SpecimenHierarchy {
        let graph = SpecimenGraph::resolve(input);
        let options = HierarchyOptions::default();
        HierarchyBuilder::new(&graph, &options).build()
    }

    fn titles(nodes: &[HierarchyNode]) -> Vec<&str> {
        nodes.iter().filter_map(|n| n.title.as_deref()).collect()
    }

    #[test]
    fn single_state_merges_into_specimen() {
        let input = [specimen("sub-01", SUBJECT, vec![state("a", SUBJECT_STATE, &[])])];
        let result = build(&input);
        let subject = &result.hierarchy.children[0];
        assert_eq!(subject.title.as_deref(), Some("Subject sub-01"));
        assert!(subject.children.is_empty());
        assert_eq!(subject.data.as_ref().unwrap().type_name(), "Dataset.Subject");
        assert_eq!(result.hierarchy.node_count(), 2);
    }

    #[test]
    fn multiple_states_become_lettered_children() {
        let input = [specimen(
            "sub-01",
            SUBJECT,
            vec![
                state("a", SUBJECT_STATE, &[]),
                state("b", SUBJECT_STATE, &[]),
                state("c", SUBJECT_STATE, &["b"]),
            ],
        )];
        let result = build(&input);
        let subject = &result.hierarchy.children[0];
        assert_eq!(titles(&subject.children), ["State A", "State B"]);
        let b = &subject.children[1];
        // internal descent continues the parent's letters
        assert_eq!(titles(&b.children), ["State C"]);
        assert_eq!(
            b.children[0].parent_relation_type,
            Some(RelationType::DescendentFrom)
        );
    }

    #[test]
    fn enclosed_specimen_hangs_below_state() {
        let input = [
            specimen(
                "sub-01",
                SUBJECT,
                vec![state("a", SUBJECT_STATE, &[]), state("b", SUBJECT_STATE, &[])],
            ),
            specimen(
                "slice-1",
                TISSUE_SAMPLE,
                vec![state("t", TISSUE_SAMPLE_STATE, &["a"])],
            ),
        ];
        let result = build(&input);
        assert_eq!(titles(&result.hierarchy.children), ["Subject sub-01"]);
        let a = &result.hierarchy.children[0].children[0];
        assert_eq!(titles(&a.children), ["Tissue sample slice-1"]);
        assert_eq!(result.hierarchy.node_count(), 5);
    }

    #[test]
    fn incomplete_descendant_is_elevated_with_its_specimen() {
        let input = [
            specimen("sub-01", SUBJECT, vec![state("a", SUBJECT_STATE, &[])]),
            specimen(
                "slice-1",
                TISSUE_SAMPLE,
                vec![
                    state("t1", TISSUE_SAMPLE_STATE, &["a"]),
                    state("t2", TISSUE_SAMPLE_STATE, &[]),
                ],
            ),
        ];
        let result = build(&input);
        let subject = &result.hierarchy.children[0];
        let t1 = &subject.children[0];
        assert_eq!(t1.title.as_deref(), Some("State A of slice-1"));
        assert_eq!(titles(&t1.children), ["Tissue sample slice-1"]);
        assert_eq!(
            t1.children[0].parent_relation_type,
            Some(RelationType::PartOf)
        );
    }

    #[test]
    fn part_of_cycle_is_broken_and_reported() {
        let group = specimen("g", "https://openminds.ebrains.eu/core/SubjectGroup", vec![]);
        let mut a = specimen("a", SUBJECT, vec![]);
        a.is_part_of = vec!["g".to_string(), "b".to_string()];
        let mut b = specimen("b", SUBJECT, vec![]);
        b.is_part_of = vec!["a".to_string()];

        let result = build(&[group, a, b]);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].instance, "a");
        let g = &result.hierarchy.children[0];
        assert_eq!(titles(&g.children), ["Subject a"]);
        assert_eq!(titles(&g.children[0].children), ["Subject b"]);
        assert!(g.children[0].children[0].children.is_empty());
    }

    #[test]
    fn descent_cycle_within_a_specimen_terminates() {
        let input = [specimen(
            "sub-01",
            SUBJECT,
            vec![
                state("p", SUBJECT_STATE, &[]),
                state("q", SUBJECT_STATE, &["p", "r"]),
                state("r", SUBJECT_STATE, &["q"]),
            ],
        )];
        let result = build(&input);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].instance, "q");
    }

    #[test]
    fn merge_keeps_parent_identity_and_unions_children() {
        let mut parent = HierarchyNode::new(NodeKey::derive("p", 0), Some(RelationType::PartOf));
        parent.title = Some("Subject s".to_string());
        let shared = HierarchyNode::new(NodeKey::derive("x", 1), None);
        parent.children = vec![shared.clone()];
        let mut child = HierarchyNode::new(NodeKey::derive("c", 2), None);
        child.title = Some("State A".to_string());
        child.children = vec![shared, HierarchyNode::new(NodeKey::derive("y", 3), None)];

        let mut pending = Vec::new();
        let merged = merge(parent, child, &mut pending);
        assert_eq!(merged.key, NodeKey::derive("p", 0));
        assert_eq!(merged.title.as_deref(), Some("Subject s"));
        assert_eq!(merged.parent_relation_type, Some(RelationType::PartOf));
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn keys_are_unique_and_stable() {
        let input = [specimen(
            "sub-01",
            SUBJECT,
            vec![state("a", SUBJECT_STATE, &[]), state("b", SUBJECT_STATE, &[])],
        )];
        let first = build(&input);
        let second = build(&input);
        assert_eq!(first.hierarchy, second.hierarchy);
        let mut keys: Vec<_> = first.hierarchy.walk().iter().map(|n| n.key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), first.hierarchy.node_count());
    }
}
