//! Relation resolution over a flat list of studied specimen.
//!
//! Resolution expands the explicitly stated specimen with implied sub-elements, prunes
//! `isPartOf` and `descendedFrom` pointers that cannot be drawn, and indexes both relations.
//! The input records are never modified; pruned relations live on the graph.

use std::collections::{HashMap, HashSet};

use kgs_model::{StudiedSpecimen, StudiedState};
use tracing::debug;

/// Position of a specimen in the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpecimenIx(usize);

/// Position of a state in the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateIx(usize);

#[derive(Debug)]
pub struct ResolvedSpecimen<'a> {
    pub record: &'a StudiedSpecimen,
    /// Whether the specimen was part of the input list.
    pub explicit: bool,
    /// `isPartOf` pruned to explicitly stated ids.
    pub is_part_of: Vec<&'a str>,
    pub states: Vec<StateIx>,
}

#[derive(Debug)]
pub struct ResolvedState<'a> {
    pub record: &'a StudiedState,
    pub owner: SpecimenIx,
    /// `descendedFrom` pruned to states of the working set.
    pub descended_from: Vec<&'a str>,
}

/// Working set with its resolved relations.
#[derive(Debug)]
pub struct SpecimenGraph<'a> {
    specimens: Vec<ResolvedSpecimen<'a>>,
    states: Vec<ResolvedState<'a>>,
    part_of_children: Vec<Vec<SpecimenIx>>,
    descendants: Vec<Vec<StateIx>>,
}

impl<'a> SpecimenGraph<'a> {
    pub fn resolve(explicit: &'a [StudiedSpecimen]) -> Self {
        let explicit_ids: HashSet<&str> = explicit.iter().map(|s| s.id.as_str()).collect();

        // A group with at least one explicitly stated sub-element is a subselection; only
        // groups without any contribute their sub-elements.
        let implicit = explicit
            .iter()
            .filter(|s| {
                !s.sub_elements.is_empty()
                    && !s
                        .sub_elements
                        .iter()
                        .any(|sub| explicit_ids.contains(sub.id.as_str()))
            })
            .flat_map(|s| s.sub_elements.iter());

        let mut seen = HashSet::new();
        let mut specimens = Vec::new();
        let mut states = Vec::new();
        let candidates = explicit
            .iter()
            .map(|s| (s, true))
            .chain(implicit.map(|s| (s, false)));
        for (record, is_explicit) in candidates {
            if !seen.insert(record.id.as_str()) {
                continue;
            }
            let ix = SpecimenIx(specimens.len());
            let mut owned = Vec::with_capacity(record.studied_state.len());
            for state in &record.studied_state {
                owned.push(StateIx(states.len()));
                states.push(ResolvedState {
                    record: state,
                    owner: ix,
                    descended_from: Vec::new(),
                });
            }
            specimens.push(ResolvedSpecimen {
                record,
                explicit: is_explicit,
                is_part_of: record
                    .is_part_of
                    .iter()
                    .map(String::as_str)
                    .filter(|id| explicit_ids.contains(id))
                    .collect(),
                states: owned,
            });
        }

        let state_ids: HashSet<&str> = states.iter().map(|s| s.record.id.as_str()).collect();
        for state in &mut states {
            state.descended_from = state
                .record
                .descended_from
                .iter()
                .map(String::as_str)
                .filter(|id| state_ids.contains(id))
                .collect();
        }

        let mut children_by_parent: HashMap<&str, Vec<SpecimenIx>> = HashMap::new();
        for (idx, specimen) in specimens.iter().enumerate() {
            for parent in &specimen.is_part_of {
                let children = children_by_parent.entry(*parent).or_default();
                if !children.contains(&SpecimenIx(idx)) {
                    children.push(SpecimenIx(idx));
                }
            }
        }
        let part_of_children = specimens
            .iter()
            .map(|s| {
                children_by_parent
                    .get(s.record.id.as_str())
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();

        let mut descendants_by_id: HashMap<&str, Vec<StateIx>> = HashMap::new();
        for (idx, state) in states.iter().enumerate() {
            for ancestor in &state.descended_from {
                let descendants = descendants_by_id.entry(*ancestor).or_default();
                if !descendants.contains(&StateIx(idx)) {
                    descendants.push(StateIx(idx));
                }
            }
        }
        let descendants = states
            .iter()
            .map(|s| {
                descendants_by_id
                    .get(s.record.id.as_str())
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();

        debug!(
            explicit = explicit_ids.len(),
            working_set = specimens.len(),
            states = states.len(),
            "resolved specimen relations"
        );

        Self {
            specimens,
            states,
            part_of_children,
            descendants,
        }
    }

    pub fn specimen(&self, ix: SpecimenIx) -> &ResolvedSpecimen<'a> {
        &self.specimens[ix.0]
    }

    pub fn state(&self, ix: StateIx) -> &ResolvedState<'a> {
        &self.states[ix.0]
    }

    /// Number of specimen in the working set.
    pub fn len(&self) -> usize {
        self.specimens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specimens.is_empty()
    }

    /// Records of the working set: the explicit specimen first, then implied sub-elements.
    pub fn working_set(&self) -> impl Iterator<Item = &'a StudiedSpecimen> + '_ {
        self.specimens.iter().map(|s| s.record)
    }

    pub fn find_specimen(&self, id: &str) -> Option<SpecimenIx> {
        self.specimens
            .iter()
            .position(|s| s.record.id == id)
            .map(SpecimenIx)
    }

    pub fn find_state(&self, id: &str) -> Option<StateIx> {
        self.states
            .iter()
            .position(|s| s.record.id == id)
            .map(StateIx)
    }

    /// Specimen whose pruned `isPartOf` names this specimen, in working set order.
    pub fn part_of_children(&self, ix: SpecimenIx) -> &[SpecimenIx] {
        &self.part_of_children[ix.0]
    }

    /// States whose pruned `descendedFrom` names this state, in working set order.
    pub fn descendants_of(&self, ix: StateIx) -> &[StateIx] {
        &self.descendants[ix.0]
    }

    /// Explicitly stated specimen that are neither part of a shown specimen nor descended
    /// from a state of another specimen.
    pub fn root_candidates(&self) -> Vec<SpecimenIx> {
        self.specimens
            .iter()
            .enumerate()
            .filter(|(_, s)| s.explicit && s.is_part_of.is_empty())
            .map(|(idx, _)| SpecimenIx(idx))
            .filter(|&ix| !self.descends_from_other_specimen(ix))
            .collect()
    }

    fn descends_from_other_specimen(&self, ix: SpecimenIx) -> bool {
        let own = self.state_ids_of(ix);
        self.specimen(ix).states.iter().any(|&st| {
            self.state(st)
                .descended_from
                .iter()
                .any(|id| !own.contains(id))
        })
    }

    fn state_ids_of(&self, ix: SpecimenIx) -> HashSet<&'a str> {
        self.specimen(ix)
            .states
            .iter()
            .map(|&st| self.state(st).record.id.as_str())
            .collect()
    }

    /// States of a specimen that do not descend from another of its own states.
    pub fn root_states_of(&self, ix: SpecimenIx) -> Vec<StateIx> {
        let own = self.state_ids_of(ix);
        self.specimen(ix)
            .states
            .iter()
            .copied()
            .filter(|&st| {
                !self
                    .state(st)
                    .descended_from
                    .iter()
                    .any(|id| own.contains(id))
            })
            .collect()
    }

    /// Owners of `descendants` all of whose states descend from the same ancestor.
    ///
    /// A state counts as covered when it is one of `descendants` or descends, within its own
    /// specimen, from a covered state. Owners are returned once, in order of first appearance.
    pub fn fully_enclosed(&self, descendants: &[StateIx]) -> Vec<SpecimenIx> {
        let mut covered: HashMap<SpecimenIx, HashSet<&str>> = HashMap::new();
        for &d in descendants {
            let owner = self.state(d).owner;
            let siblings = &self.specimen(owner).states;
            let mut included: HashSet<&str> = HashSet::new();
            included.insert(self.state(d).record.id.as_str());
            loop {
                let before = included.len();
                for &sibling in siblings {
                    let state = self.state(sibling);
                    if state.descended_from.iter().any(|id| included.contains(id)) {
                        included.insert(state.record.id.as_str());
                    }
                }
                if included.len() == before {
                    break;
                }
            }
            covered.entry(owner).or_default().extend(included);
        }

        let mut enclosed = Vec::new();
        for &d in descendants {
            let owner = self.state(d).owner;
            if enclosed.contains(&owner) {
                continue;
            }
            let ids = &covered[&owner];
            let all_covered = self
                .specimen(owner)
                .states
                .iter()
                .all(|&st| ids.contains(self.state(st).record.id.as_str()));
            if all_covered {
                enclosed.push(owner);
            }
        }
        enclosed
    }
}
