// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Forest Editor: a headless editor for tree-forest diagrams.
//!
//! This crate joins [`understory_forest`] (the model) and [`understory_gesture`] (the input
//! state machine) into a [`TreeForestEditor`] that a UI drives with resolved pointer and key
//! events and that draws through a [`Renderer`] it is given.
//!
//! What a user can do:
//! - Drag from one node onto another: the shallower of the two adopts the deeper one, unless
//!   it already holds [`EditorOptions::max_children`] children.
//! - Click a node or a link, then press Delete: the node goes with its subtree, or the link is
//!   cut and the child's subtree becomes a tree of its own.
//! - Drag an item from the [`Legend`] onto the canvas: it becomes a new root in the column it
//!   was dropped in, or restyles the node it was dropped on.
//!
//! ## Geometry
//!
//! Layout happens in canvas space. Depth maps to a column on a [`DepthScale`] spanning
//! [`EditorOptions::width`]; [`layout_forest`] stacks leaves vertically and centres parents
//! on their children. Links are drawn with [`link_path`]. Event handlers take screen-space
//! points, offset from canvas space by [`EditorOptions::margin`].
//!
//! ## Interchange
//!
//! Trees load from and export to nested `{ "type": .., "name": .., "children": [..] }` JSON
//! (see [`understory_forest::NodeData`]). Options are JSON too, with `camelCase` keys and a
//! default for every field (see [`EditorOptions::from_json`]).
//!
//! ## Logging
//!
//! Edits are logged through the [`log`] facade: moves and rejected moves at `debug`, dropped
//! templates of unknown type at `warn`, gesture transitions at `trace`.

mod editor;
mod error;
mod layout;
mod legend;
mod options;
mod render;
mod scale;

pub use editor::{TemplateDrop, TreeForestEditor};
pub use error::EditorError;
pub use layout::{layout_forest, link_path};
pub use legend::{Legend, LegendEntry};
pub use options::{EditorOptions, Margin};
pub use render::Renderer;
pub use scale::DepthScale;

pub use understory_forest;
pub use understory_gesture;
