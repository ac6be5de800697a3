// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the forest: node identifiers, placement, and cached layout.

use alloc::string::String;
use kurbo::Point;
use smallvec::SmallVec;

/// Identifier for a node in the forest.
///
/// Ids are allocated from a per-forest counter that only moves forward, so an
/// id is never reused, even after the node it named was deleted or the forest
/// was reloaded.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// Raw value of the id, suitable as a diffing key for renderers.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Where a root sits on the canvas.
///
/// Only read while the node is a root. Non-root nodes inherit their column
/// from the root of their tree.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    /// Depth column the tree starts at.
    pub column: u32,
    /// Pinned vertical centre of the tree, or `None` to share the canvas height
    /// with the other unpinned trees.
    pub anchor_y: Option<f64>,
}

/// Derived layout cached on a node by the layout pass.
///
/// Not authoritative: structural questions are answered from the arena.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeLayout {
    /// Depth column the node was drawn in.
    pub depth: u32,
    /// Canvas-space position of the node centre.
    pub position: Point,
}

pub(crate) type Children = SmallVec<[NodeId; 2]>;

/// A node of the forest.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) node_type: String,
    pub(crate) name: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Option<Children>,
    pub(crate) placement: Placement,
    pub(crate) layout: Option<NodeLayout>,
}

impl Node {
    pub(crate) fn new(id: NodeId, node_type: String, name: Option<String>) -> Self {
        Self {
            id,
            node_type,
            name,
            parent: None,
            children: None,
            placement: Placement::default(),
            layout: None,
        }
    }

    /// Stable id of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Legend key of this node.
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// Optional label carried through load and export.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parent of this node, or `None` for roots.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered children, or `None` when the node has none.
    ///
    /// An empty child list is never stored; see [`Node::child_ids`] for a
    /// slice that is simply empty in that case.
    pub fn children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }

    /// Ordered children as a possibly empty slice.
    pub fn child_ids(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Root placement of this node.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Layout assigned by the last layout pass, if any.
    pub fn layout(&self) -> Option<NodeLayout> {
        self.layout
    }

    pub(crate) fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, |c| c.len())
    }

    /// Remove `child` from the child list, dropping the list when it empties.
    pub(crate) fn detach_child(&mut self, child: NodeId) {
        if let Some(children) = self.children.as_mut() {
            children.retain(|c| *c != child);
            if children.is_empty() {
                self.children = None;
            }
        }
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.get_or_insert_with(Children::new).push(child);
    }
}
