// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core forest implementation: structure, edits, queries.

use alloc::{string::String, vec, vec::Vec};
use hashbrown::{HashMap, HashSet};
use kurbo::Point;

use crate::changes::Changes;
use crate::data::NodeData;
use crate::error::{ForestError, LoadError};
use crate::types::{Node, NodeId, NodeLayout, Placement};

/// An ordered set of editable trees.
///
/// Nodes live in an arena keyed by [`NodeId`]; the parent/child relation is
/// stored as ids on both sides and every edit keeps the two sides in sync.
/// Roots are kept in [`Forest::trees`] in insertion order.
///
/// Edits are recorded and handed out in batches by [`Forest::commit`], which
/// renderers use to diff their visuals.
///
/// ## Example
///
/// ```rust
/// use understory_forest::{Forest, NodeData, Reparent};
///
/// let mut forest = Forest::new();
/// let root = forest
///     .load(&NodeData::new("decision").with_child(NodeData::new("action")))
///     .unwrap();
/// let action = forest.children_of(root)[0];
///
/// // Cutting the link turns the child into a second root.
/// assert!(forest.delete_link(action));
/// assert_eq!(forest.trees(), &[root, action]);
///
/// // Dragging one onto the other puts it back; the shallower node is the parent.
/// let outcome = forest.reparent(action, root, None);
/// assert_eq!(outcome, Reparent::Moved { parent: root, child: action });
/// ```
#[derive(Clone, Default)]
pub struct Forest {
    nodes: HashMap<NodeId, Node>,
    trees: Vec<NodeId>,
    /// last id handed out; never decreases
    next_id: u64,
    pending: Changes,
}

impl core::fmt::Debug for Forest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Forest")
            .field("nodes", &self.nodes.len())
            .field("trees", &self.trees)
            .field("next_id", &self.next_id)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

/// Result of [`Forest::reparent`].
///
/// Only [`Reparent::Moved`] changes the forest; every other outcome leaves it
/// exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reparent {
    /// `child` is now the last child of `parent`.
    Moved {
        /// New parent.
        parent: NodeId,
        /// Node that was moved.
        child: NodeId,
    },
    /// Both ids name the same node.
    SameNode,
    /// The would-be parent already holds the maximum number of children.
    AtCapacity {
        /// The full node.
        parent: NodeId,
    },
    /// The would-be parent lies inside the subtree of the would-be child.
    ///
    /// Depths normally rule this out; it only happens once column numbers
    /// saturate.
    WouldCycle,
    /// One of the ids is not in the forest.
    Missing,
}

impl Reparent {
    /// Returns `true` if the forest changed.
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

impl Forest {
    /// Create an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole forest with a single tree built from `data`.
    ///
    /// Every node gets a fresh id. The input is checked before anything is
    /// touched, so on error the current forest stays as it was.
    pub fn load(&mut self, data: &NodeData) -> Result<NodeId, LoadError> {
        check_data(data)?;

        let old: Vec<NodeId> = self.iter().map(Node::id).collect();
        self.pending.record_removed(&old);
        self.nodes.clear();
        self.trees.clear();

        let root = self.insert_subtree(data);
        self.trees.push(root);
        log::debug!("loaded tree {root} with {} nodes", self.nodes.len());
        Ok(root)
    }

    /// Export every tree, in root order, as nested [`NodeData`].
    pub fn export(&self) -> Vec<NodeData> {
        self.trees
            .iter()
            .filter_map(|root| self.export_tree(*root))
            .collect()
    }

    /// Export the subtree rooted at `id`, or `None` if `id` is unknown.
    pub fn export_tree(&self, id: NodeId) -> Option<NodeData> {
        let node = self.nodes.get(&id)?;
        Some(NodeData {
            node_type: node.node_type.clone(),
            name: node.name.clone(),
            children: node
                .child_ids()
                .iter()
                .filter_map(|child| self.export_tree(*child))
                .collect(),
        })
    }

    /// Insert a new parentless node and append it to the tree list.
    pub fn insert_root(&mut self, node_type: impl Into<String>, placement: Placement) -> NodeId {
        let id = self.alloc_id();
        let mut node = Node::new(id, node_type.into(), None);
        node.placement = placement;
        self.nodes.insert(id, node);
        self.trees.push(id);
        self.pending.record_added(id);
        id
    }

    /// Move a node under another one.
    ///
    /// Of `a` and `b`, the shallower node (by [`Forest::depth`]) becomes the
    /// parent and the deeper one the child. On equal depth `a` is the parent.
    /// The child is detached from its current parent (or from the tree list)
    /// and appended as the last child of the parent.
    ///
    /// With `max_children` set, a parent that already has that many children
    /// refuses the move and nothing changes. A move that would put a node
    /// under its own descendant is refused as well.
    pub fn reparent(&mut self, a: NodeId, b: NodeId, max_children: Option<usize>) -> Reparent {
        if a == b {
            return Reparent::SameNode;
        }
        let (Some(depth_a), Some(depth_b)) = (self.depth(a), self.depth(b)) else {
            return Reparent::Missing;
        };
        let (parent, child) = if depth_a > depth_b { (b, a) } else { (a, b) };

        if self.is_ancestor(child, parent) {
            log::debug!("{parent} is inside the subtree of {child}, not adopting it");
            return Reparent::WouldCycle;
        }

        if let Some(max) = max_children
            && self.nodes.get(&parent).map_or(0, Node::child_count) >= max
        {
            log::debug!("{parent} is full ({max} children), not adopting {child}");
            return Reparent::AtCapacity { parent };
        }

        self.detach(child);
        self.link_parent(child, parent);
        self.pending.record_moved(child);
        Reparent::Moved { parent, child }
    }

    /// Remove a node and its whole subtree.
    ///
    /// Returns `false` if `id` is unknown.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.detach(id);
        let doomed: Vec<NodeId> = self.descendants(id).collect();
        for d in &doomed {
            self.nodes.remove(d);
        }
        self.pending.record_removed(&doomed);
        true
    }

    /// Cut the link between `id` and its parent, keeping the subtree.
    ///
    /// The node becomes a new root (appended to the tree list) that keeps its
    /// current column and vertical position. Returns `false` for roots and
    /// unknown ids.
    pub fn delete_link(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent_of(id) else {
            return false;
        };
        let column = self.depth(id).unwrap_or(0);
        self.unlink_parent(id, parent);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.placement = Placement {
                column,
                anchor_y: node.layout.map(|l| l.position.y),
            };
        }
        self.trees.push(id);
        self.pending.record_moved(id);
        true
    }

    /// Change the type of a node in place.
    ///
    /// Returns `true` if the type changed.
    pub fn set_type(&mut self, id: NodeId, node_type: &str) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) if node.node_type != node_type => {
                node.node_type = node_type.into();
                self.pending.record_restyled(id);
                true
            }
            _ => false,
        }
    }

    /// Cache layout on a node. Ignored for unknown ids.
    pub fn set_layout(&mut self, id: NodeId, layout: NodeLayout) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.layout = Some(layout);
        }
    }

    /// Drain the changes recorded since the previous commit.
    pub fn commit(&mut self) -> Changes {
        core::mem::take(&mut self.pending)
    }

    /// Returns `true` if edits are waiting for [`Forest::commit`].
    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Depth of a node, counted in columns.
    ///
    /// This is the column its root starts at plus the number of edges from
    /// the root. For loaded trees (column 0) it is the plain depth from root.
    /// Saturates at `u32::MAX`.
    pub fn depth(&self, id: NodeId) -> Option<u32> {
        let mut node = self.nodes.get(&id)?;
        let mut hops = 0_u32;
        while let Some(parent) = node.parent {
            node = self.nodes.get(&parent)?;
            hops = hops.saturating_add(1);
        }
        Some(node.placement.column.saturating_add(hops))
    }

    /// Root of the tree containing `id`.
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        while let Some(parent) = self.nodes.get(&current)?.parent {
            current = parent;
        }
        Some(current)
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent_of(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent_of(p);
        }
        false
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns `true` if `id` is in the forest.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Roots, in order.
    pub fn trees(&self) -> &[NodeId] {
        &self.trees
    }

    /// Parent of a node, or `None` for roots and unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Children of a node, or an empty slice for leaves and unknown ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(Node::child_ids).unwrap_or(&[])
    }

    /// Pre-order traversal of the subtree rooted at `root`.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let stack = if self.contains(root) {
            vec![root]
        } else {
            Vec::new()
        };
        Descendants {
            forest: self,
            stack,
        }
    }

    /// Every node, tree by tree, in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.trees
            .iter()
            .flat_map(|root| self.descendants(*root))
            .filter_map(|id| self.nodes.get(&id))
    }

    /// Every `(parent, child)` edge, tree by tree, in pre-order of the child.
    ///
    /// A link is identified by its child.
    pub fn links(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.iter()
            .filter_map(|node| node.parent.map(|parent| (parent, node.id)))
    }

    /// The node whose cached position is closest to `point`, if within `radius`.
    ///
    /// Nodes without layout are skipped. Equal distances resolve to the older id.
    pub fn nearest_within(&self, point: Point, radius: f64) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for node in self.nodes.values() {
            let Some(layout) = node.layout else {
                continue;
            };
            let distance = layout.position.distance(point);
            if distance > radius {
                continue;
            }
            best = match best {
                Some((id, d)) if d < distance || (d == distance && id < node.id) => Some((id, d)),
                _ => Some((node.id, distance)),
            };
        }
        best.map(|(id, _)| id)
    }

    /// Check every structural invariant.
    ///
    /// Every edit keeps these by construction; this exists for tests and for
    /// hosts that want to assert on data they loaded.
    pub fn validate(&self) -> Result<(), ForestError> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();

        for &id in &ids {
            let node = &self.nodes[&id];
            if let Some(children) = &node.children {
                if children.is_empty() {
                    return Err(ForestError::EmptyChildren(id));
                }
                for &child in children {
                    let Some(c) = self.nodes.get(&child) else {
                        return Err(ForestError::Dangling(child));
                    };
                    if c.parent != Some(id) {
                        return Err(ForestError::ChildMismatch { parent: id, child });
                    }
                }
            }
            match node.parent {
                Some(parent) => {
                    let Some(p) = self.nodes.get(&parent) else {
                        return Err(ForestError::Dangling(parent));
                    };
                    let count = p.child_ids().iter().filter(|c| **c == id).count();
                    if count != 1 {
                        return Err(ForestError::ParentMismatch {
                            child: id,
                            parent,
                            count,
                        });
                    }
                }
                None => {
                    if self.trees.iter().filter(|t| **t == id).count() != 1 {
                        return Err(ForestError::RootMismatch(id));
                    }
                }
            }
        }

        for &root in &self.trees {
            match self.nodes.get(&root) {
                None => return Err(ForestError::Dangling(root)),
                Some(node) if node.parent.is_some() => {
                    return Err(ForestError::RootMismatch(root));
                }
                Some(_) => {}
            }
        }

        let mut seen: HashSet<NodeId> = HashSet::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.trees.clone();
        while let Some(id) = stack.pop() {
            if seen.insert(id) {
                stack.extend_from_slice(self.children_of(id));
            }
        }
        if let Some(lost) = ids.into_iter().find(|id| !seen.contains(id)) {
            return Err(ForestError::Unreachable(lost));
        }
        Ok(())
    }
}

impl Forest {
    // --- internals ---

    fn alloc_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId(self.next_id)
    }

    fn insert_node(&mut self, parent: Option<NodeId>, data: &NodeData) -> NodeId {
        let id = self.alloc_id();
        self.nodes.insert(
            id,
            Node::new(id, data.node_type.clone(), data.name.clone()),
        );
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        self.pending.record_added(id);
        id
    }

    fn insert_subtree(&mut self, data: &NodeData) -> NodeId {
        let root = self.insert_node(None, data);
        let mut stack = vec![(root, data)];
        while let Some((id, data)) = stack.pop() {
            for child in &data.children {
                let child_id = self.insert_node(Some(id), child);
                stack.push((child_id, child));
            }
        }
        root
    }

    /// Take `id` out of its parent's children, or out of the tree list.
    fn detach(&mut self, id: NodeId) {
        match self.parent_of(id) {
            Some(parent) => self.unlink_parent(id, parent),
            None => self.trees.retain(|t| *t != id),
        }
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.push_child(id);
        }
        if let Some(n) = self.nodes.get_mut(&id) {
            n.parent = Some(parent);
            n.placement = Placement::default();
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.detach_child(id);
        }
        if let Some(n) = self.nodes.get_mut(&id) {
            n.parent = None;
        }
    }
}

fn check_data(data: &NodeData) -> Result<(), LoadError> {
    if data.node_type.is_empty() {
        return Err(LoadError::Empty);
    }
    let mut stack: Vec<(&NodeData, u32)> = data.children.iter().map(|c| (c, 1)).collect();
    while let Some((node, depth)) = stack.pop() {
        if node.node_type.is_empty() {
            return Err(LoadError::MissingType { depth });
        }
        stack.extend(node.children.iter().map(|c| (c, depth + 1)));
    }
    Ok(())
}

/// Pre-order iterator returned by [`Forest::descendants`].
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    forest: &'a Forest,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Reversed so that children come out in their stored order.
        self.stack
            .extend(self.forest.children_of(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// Loads `a -> b -> c` and returns the forest with the three ids.
    fn chain() -> (Forest, NodeId, NodeId, NodeId) {
        let mut forest = Forest::new();
        let a = forest
            .load(&NodeData::new("a").with_child(NodeData::new("b").with_child(NodeData::new("c"))))
            .unwrap();
        let b = forest.children_of(a)[0];
        let c = forest.children_of(b)[0];
        let _ = forest.commit();
        (forest, a, b, c)
    }

    fn sample() -> NodeData {
        NodeData::new("decision")
            .with_name("Raining?")
            .with_child(
                NodeData::new("decision")
                    .with_child(NodeData::new("action").with_name("Umbrella"))
                    .with_child(NodeData::new("action")),
            )
            .with_child(NodeData::new("end"))
    }

    #[test]
    fn load_builds_single_tree() {
        let mut forest = Forest::new();
        let root = forest.load(&sample()).unwrap();
        assert_eq!(forest.trees(), &[root]);
        assert_eq!(forest.len(), 5);
        assert_eq!(forest.get(root).unwrap().name(), Some("Raining?"));
        forest.validate().unwrap();
    }

    #[test]
    fn export_round_trips() {
        let mut forest = Forest::new();
        forest.load(&sample()).unwrap();
        assert_eq!(forest.export(), vec![sample()]);
    }

    #[test]
    fn load_rejects_empty_and_keeps_previous() {
        let (mut forest, a, _, _) = chain();
        let before = forest.export();
        assert_eq!(forest.load(&NodeData::default()), Err(LoadError::Empty));
        assert_eq!(forest.export(), before);
        assert_eq!(forest.trees(), &[a]);
        assert!(!forest.has_pending_changes());
    }

    #[test]
    fn load_rejects_untyped_descendant() {
        let mut forest = Forest::new();
        let data = NodeData::new("a").with_child(NodeData::new("b").with_child(NodeData::default()));
        assert_eq!(forest.load(&data), Err(LoadError::MissingType { depth: 2 }));
        assert!(forest.is_empty());
    }

    #[test]
    fn reload_never_reuses_ids() {
        let (mut forest, a, b, c) = chain();
        let root = forest.load(&NodeData::new("x")).unwrap();
        assert!(![a, b, c].contains(&root));
        assert!(!forest.contains(a));
        let changes = forest.commit();
        assert_eq!(changes.removed, vec![a, b, c]);
        assert_eq!(changes.added, vec![root]);
    }

    #[test]
    fn reload_before_commit_reports_net_changes() {
        let mut forest = Forest::new();
        forest.load(&sample()).unwrap();
        let root = forest.load(&sample()).unwrap();
        let mut changes = forest.commit();
        assert!(changes.removed.is_empty(), "first tree was never committed");
        let mut live: Vec<NodeId> = forest.descendants(root).collect();
        live.sort_unstable();
        changes.added.sort_unstable();
        assert_eq!(changes.added, live);
    }

    #[test]
    fn self_reparent_is_noop() {
        let (mut forest, _, b, _) = chain();
        let before = forest.export();
        assert_eq!(forest.reparent(b, b, None), Reparent::SameNode);
        assert_eq!(forest.export(), before);
        assert!(!forest.has_pending_changes());
    }

    #[test]
    fn shallower_node_becomes_parent() {
        let (mut forest, a, b, c) = chain();
        // Released on the root while dragging from the grandchild.
        assert_eq!(
            forest.reparent(c, a, None),
            Reparent::Moved { parent: a, child: c }
        );
        assert_eq!(forest.children_of(a), &[b, c]);
        // b lost its only child; the list is gone rather than empty.
        assert_eq!(forest.get(b).unwrap().children(), None);
        forest.validate().unwrap();
    }

    #[test]
    fn equal_depth_press_target_is_parent() {
        let mut forest = Forest::new();
        let root = forest
            .load(&NodeData::new("r").with_child(NodeData::new("x")).with_child(NodeData::new("y")))
            .unwrap();
        let (x, y) = (forest.children_of(root)[0], forest.children_of(root)[1]);
        assert_eq!(
            forest.reparent(y, x, None),
            Reparent::Moved { parent: y, child: x }
        );
        assert_eq!(forest.children_of(root), &[y]);
        assert_eq!(forest.children_of(y), &[x]);
    }

    #[test]
    fn reparenting_a_root_removes_it_from_trees() {
        let (mut forest, a, b, _) = chain();
        let loose = forest.insert_root("loose", Placement { column: 3, anchor_y: None });
        assert_eq!(forest.trees(), &[a, loose]);
        assert_eq!(forest.depth(loose), Some(3));
        assert_eq!(
            forest.reparent(loose, b, None),
            Reparent::Moved { parent: b, child: loose }
        );
        assert_eq!(forest.trees(), &[a]);
        assert_eq!(forest.children_of(b).last(), Some(&loose));
        assert_eq!(forest.depth(loose), Some(2));
        forest.validate().unwrap();
    }

    #[test]
    fn cap_leaves_forest_unchanged() {
        let mut forest = Forest::new();
        let root = forest
            .load(&NodeData::new("r").with_child(NodeData::new("x")).with_child(NodeData::new("y")))
            .unwrap();
        let loose = forest.insert_root("z", Placement::default());
        let _ = forest.commit();
        let before = forest.export();

        assert_eq!(
            forest.reparent(root, loose, Some(2)),
            Reparent::AtCapacity { parent: root }
        );
        assert_eq!(forest.export(), before);
        assert_eq!(forest.trees(), &[root, loose]);
        assert!(!forest.has_pending_changes());

        // One slot below the cap is fine.
        assert!(forest.reparent(root, loose, Some(3)).is_moved());
    }

    #[test]
    fn saturated_columns_cannot_form_a_cycle() {
        let mut forest = Forest::new();
        let far = Placement { column: u32::MAX, anchor_y: None };
        let r = forest.insert_root("r", far);
        let x = forest.insert_root("x", far);
        // Equal depth: the pressed node adopts the other.
        assert_eq!(forest.reparent(r, x, None), Reparent::Moved { parent: r, child: x });
        // Placement resets on adoption, but `r` keeps its column and `x` saturates.
        assert_eq!(forest.depth(r), forest.depth(x));
        assert_eq!(forest.reparent(x, r, None), Reparent::WouldCycle);
        assert_eq!(forest.trees(), &[r]);
        assert_eq!(forest.parent_of(x), Some(r));
        forest.validate().unwrap();
    }

    #[test]
    fn delete_link_splits_tree() {
        let (mut forest, a, b, c) = chain();
        assert!(forest.delete_link(b));
        assert_eq!(forest.trees(), &[a, b]);
        assert_eq!(forest.get(a).unwrap().children(), None);
        assert_eq!(forest.parent_of(b), None);
        assert_eq!(forest.children_of(b), &[c]);
        // The detached tree stays in its column.
        assert_eq!(forest.depth(b), Some(1));
        assert_eq!(forest.depth(c), Some(2));
        assert_eq!(
            forest.export(),
            vec![NodeData::new("a"), NodeData::new("b").with_child(NodeData::new("c"))]
        );
        assert_eq!(forest.commit().moved, vec![b]);
        forest.validate().unwrap();
    }

    #[test]
    fn delete_link_on_root_is_noop() {
        let (mut forest, a, _, _) = chain();
        assert!(!forest.delete_link(a));
        assert_eq!(forest.trees(), &[a]);
        assert!(!forest.has_pending_changes());
    }

    #[test]
    fn delete_node_discards_subtree() {
        let (mut forest, a, b, c) = chain();
        assert!(forest.delete_node(b));
        assert_eq!(forest.trees(), &[a]);
        assert_eq!(forest.get(a).unwrap().children(), None);
        assert!(!forest.contains(b));
        assert!(!forest.contains(c));
        assert_eq!(forest.export(), vec![NodeData::new("a")]);
        assert_eq!(forest.commit().removed, vec![b, c]);
        forest.validate().unwrap();
    }

    #[test]
    fn delete_root_drops_tree() {
        let (mut forest, a, _, _) = chain();
        let other = forest.insert_root("x", Placement::default());
        assert!(forest.delete_node(a));
        assert_eq!(forest.trees(), &[other]);
        assert_eq!(forest.len(), 1);
        assert!(!forest.delete_node(a), "second delete is a no-op");
    }

    #[test]
    fn ids_are_stable_across_edits() {
        let mut forest = Forest::new();
        let root = forest.load(&sample()).unwrap();
        let before: Vec<(NodeId, String, Option<String>)> = forest
            .iter()
            .map(|n| (n.id(), n.node_type().into(), n.name().map(Into::into)))
            .collect();
        let inner = forest.children_of(root)[0];
        let umbrella = forest.children_of(inner)[0];

        forest.delete_link(inner);
        forest.reparent(root, umbrella, None);
        forest.reparent(root, inner, None);
        assert_eq!(forest.trees(), &[root]);
        assert_ne!(forest.export(), vec![sample()], "structure did change");

        for (id, node_type, name) in before {
            let node = forest.get(id).unwrap();
            assert_eq!(node.node_type(), node_type, "type of {id}");
            assert_eq!(node.name(), name.as_deref(), "name of {id}");
        }
        assert_eq!(forest.get(umbrella).unwrap().name(), Some("Umbrella"));
        assert_eq!(forest.parent_of(umbrella), Some(root));
    }

    #[test]
    fn set_type_records_restyle() {
        let (mut forest, _, b, _) = chain();
        assert!(forest.set_type(b, "other"));
        assert!(!forest.set_type(b, "other"), "same type is not a change");
        assert_eq!(forest.commit().restyled, vec![b]);
    }

    #[test]
    fn changes_collapse_within_a_commit() {
        let mut forest = Forest::new();
        let x = forest.insert_root("x", Placement::default());
        let y = forest.insert_root("y", Placement::default());
        forest.reparent(x, y, None);
        forest.delete_node(x);
        assert!(forest.commit().is_empty(), "created and deleted before commit");
    }

    #[test]
    fn links_are_keyed_by_child() {
        let (forest, a, b, c) = chain();
        assert_eq!(forest.links().collect::<Vec<_>>(), vec![(a, b), (b, c)]);
    }

    #[test]
    fn nearest_within_uses_cached_layout() {
        let (mut forest, a, b, c) = chain();
        forest.set_layout(a, NodeLayout { depth: 0, position: Point::new(0.0, 50.0) });
        forest.set_layout(b, NodeLayout { depth: 1, position: Point::new(50.0, 50.0) });
        assert_eq!(forest.nearest_within(Point::new(47.0, 54.0), 10.0), Some(b));
        assert_eq!(forest.nearest_within(Point::new(25.0, 50.0), 10.0), None);
        // c has no layout yet and can never match.
        assert_eq!(forest.nearest_within(Point::new(100.0, 50.0), 1000.0), Some(b));
        assert!(forest.get(c).unwrap().layout().is_none());
    }

    #[test]
    fn invariants_hold_across_edit_sequences() {
        let mut forest = Forest::new();
        forest.load(&sample()).unwrap();
        let mut seed = 0x2545_f491_u32;
        let mut next = move |n: usize| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            seed as usize % n
        };
        for step in 0..400 {
            let ids: Vec<NodeId> = forest.iter().map(Node::id).collect();
            if ids.is_empty() {
                forest.insert_root("fresh", Placement::default());
                continue;
            }
            let a = ids[next(ids.len())];
            let b = ids[next(ids.len())];
            match next(5) {
                0 | 1 => {
                    forest.reparent(a, b, Some(2));
                }
                2 => {
                    forest.delete_link(a);
                }
                3 if step % 4 == 0 => {
                    forest.delete_node(a);
                }
                _ => {
                    forest.insert_root("fresh", Placement { column: 1, anchor_y: None });
                }
            }
            forest.validate().unwrap();
            assert!(
                forest.iter().all(|n| n.child_ids().len() <= 2),
                "cap of two children held"
            );
            assert!(forest.iter().all(|n| n.children() != Some(&[][..])));
        }
    }

    #[test]
    fn validate_reports_broken_links() {
        let (mut forest, a, b, _) = chain();
        forest.nodes.get_mut(&b).unwrap().parent = None;
        assert_eq!(
            forest.validate(),
            Err(ForestError::ChildMismatch { parent: a, child: b })
        );
    }
}
