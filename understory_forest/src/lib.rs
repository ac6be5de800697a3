// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Forest: an editable forest of ordered trees.
//!
//! Understory Forest is the model behind tree-diagram editors: decision trees, behaviour trees,
//! outlines, or any other diagram where a user drags nodes around to restructure a hierarchy.
//!
//! - Keeps several trees side by side, each with its own root.
//! - Stores nodes in an arena keyed by [`NodeId`], with parent and child ids on both sides of
//!   every edge instead of live references.
//! - Records what changed between two [`Forest::commit`] calls so a renderer can diff by id.
//!
//! ## Invariants
//!
//! Every public operation keeps these, and [`Forest::validate`] checks them:
//! - A non-root node appears exactly once in its parent's children.
//! - A node without children stores none (never an empty list).
//! - Ids are unique across the forest and never reused.
//! - A node is either a child of another node or listed in [`Forest::trees`], never both.
//!
//! ## API overview
//!
//! - [`Forest`]: the arena plus the ordered list of roots.
//! - [`Node`]: read-only view of one node (type, optional name, parent, children, layout).
//! - [`NodeData`]: nested `{ type, children? }` interchange format, serde-enabled.
//! - [`Changes`]: ids added, removed, moved, or restyled since the last commit.
//!
//! Key operations:
//! - [`Forest::load`] / [`Forest::export`]: whole-forest interchange.
//! - [`Forest::reparent`]: the shallower node adopts the deeper one, subject to a children cap.
//! - [`Forest::delete_node`]: discard a subtree.
//! - [`Forest::delete_link`]: cut an edge; the child's subtree becomes a new tree.
//! - [`Forest::insert_root`] and [`Forest::set_type`]: the building blocks for dropping
//!   legend items onto the canvas.
//!
//! ## Not a layout engine
//!
//! Nodes carry a cached [`NodeLayout`] (depth column and position) that a layout pass or a
//! renderer writes with [`Forest::set_layout`]. The forest reads it only to find the node
//! nearest to a point; structure never depends on it.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod changes;
mod data;
mod error;
mod forest;
mod types;

pub use changes::Changes;
pub use data::NodeData;
pub use error::{ForestError, LoadError};
pub use forest::{Descendants, Forest, Reparent};
pub use types::{Node, NodeId, NodeLayout, Placement};
