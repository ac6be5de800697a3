// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the forest.

use crate::types::NodeId;

/// Reasons [`crate::Forest::load`] refuses its input.
///
/// A refused load leaves the previous forest untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The root has no type, i.e. there is nothing to load.
    #[error("nothing to load: the root node has no type")]
    Empty,
    /// A descendant has no type.
    #[error("node at depth {depth} has no type")]
    MissingType {
        /// Depth of the first offending node below the root.
        depth: u32,
    },
}

/// Structural invariant violations found by [`crate::Forest::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ForestError {
    /// A parent's child list does not contain the child exactly once.
    #[error("{child} lists {parent} as parent but appears {count} times in its children")]
    ParentMismatch {
        /// Child whose back reference is inconsistent.
        child: NodeId,
        /// Claimed parent.
        parent: NodeId,
        /// How often the child occurs in the parent's list.
        count: usize,
    },
    /// A child list names a node whose back reference points elsewhere.
    #[error("{parent} lists {child} as child but the child disagrees")]
    ChildMismatch {
        /// Parent holding the stale entry.
        parent: NodeId,
        /// Listed child.
        child: NodeId,
    },
    /// A node refers to an id that is not in the arena.
    #[error("{0} is referenced but not present")]
    Dangling(NodeId),
    /// A node stores an empty child list instead of none.
    #[error("{0} stores an empty child list")]
    EmptyChildren(NodeId),
    /// A root is missing from the tree list, listed twice, or a listed tree has a parent.
    #[error("{0} is not listed exactly once as a root")]
    RootMismatch(NodeId),
    /// A node is not reachable from any root.
    #[error("{0} is not reachable from any root")]
    Unreachable(NodeId),
}
