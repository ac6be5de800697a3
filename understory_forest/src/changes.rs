// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change summary types returned from commit.

use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::types::NodeId;

/// A batched set of changes derived from [`crate::Forest::commit`].
///
/// Renderers key their visuals by [`NodeId`] and use this to decide what to
/// create, tear down, animate, or restyle. A link is keyed by its child id, so
/// a `moved` node also means its incoming link changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    /// Nodes that did not exist at the previous commit.
    pub added: Vec<NodeId>,
    /// Nodes (including whole subtrees) that were discarded.
    pub removed: Vec<NodeId>,
    /// Nodes whose parent changed.
    pub moved: Vec<NodeId>,
    /// Nodes whose type changed in place.
    pub restyled: Vec<NodeId>,
}

impl Changes {
    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.moved.is_empty()
            && self.restyled.is_empty()
    }

    /// `id` was just allocated, so it cannot be listed yet.
    pub(crate) fn record_added(&mut self, id: NodeId) {
        self.added.push(id);
    }

    /// Record a batch of discarded nodes in one pass over the lists.
    ///
    /// Every id must name a node that existed until now; ids are never
    /// reused, so none of them can already be in `removed`.
    pub(crate) fn record_removed(&mut self, ids: &[NodeId]) {
        if ids.is_empty() {
            return;
        }
        let doomed: HashSet<NodeId> = ids.iter().copied().collect();
        // A node created and discarded between two commits was never seen.
        let mut unseen: HashSet<NodeId> = HashSet::new();
        self.added.retain(|a| {
            let keep = !doomed.contains(a);
            if !keep {
                unseen.insert(*a);
            }
            keep
        });
        self.removed
            .extend(ids.iter().copied().filter(|id| !unseen.contains(id)));
        self.moved.retain(|m| !doomed.contains(m));
        self.restyled.retain(|r| !doomed.contains(r));
    }

    pub(crate) fn record_moved(&mut self, id: NodeId) {
        if !self.added.contains(&id) {
            push_unique(&mut self.moved, id);
        }
    }

    pub(crate) fn record_restyled(&mut self, id: NodeId) {
        if !self.added.contains(&id) {
            push_unique(&mut self.restyled, id);
        }
    }
}

fn push_unique(list: &mut Vec<NodeId>, id: NodeId) {
    if !list.contains(&id) {
        list.push(id);
    }
}
