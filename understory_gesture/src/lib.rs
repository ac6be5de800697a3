// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Gesture: selection and drag gestures for node-and-link diagrams.
//!
//! This crate turns raw pointer and keyboard input over a diagram into a small set of edit
//! requests. It knows nothing about trees, rendering, or hit testing: the host resolves each
//! event to a node, a link, a legend item, or empty canvas, feeds it to a [`GestureState`], and
//! applies the [`GestureAction`] it gets back.
//!
//! ## States
//!
//! - [`State::Idle`]: nothing selected.
//! - [`State::NodeArmed`]: a node is selected; while the press that selected it is held, a
//!   drag preview edge follows the pointer.
//! - [`State::LinkArmed`]: a link is selected.
//! - [`State::LegendDrag`]: a legend template is being dragged onto the canvas.
//!
//! Selecting a node or a link always clears the other.
//!
//! ## Usage
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::{Buttons, GestureAction, GestureState, Key};
//!
//! let mut gestures: GestureState<u32, &str> = GestureState::new();
//!
//! // Drag from node 1 and release on node 2.
//! gestures.on_node_press(1, Point::new(10.0, 10.0));
//! gestures.on_pointer_move(Point::new(80.0, 40.0), Buttons::PRIMARY);
//! assert!(gestures.drag_preview().is_some());
//! assert_eq!(
//!     gestures.on_node_release(&2),
//!     GestureAction::Reparent { pressed: 1, released: 2 }
//! );
//! assert!(gestures.drag_preview().is_none());
//!
//! // Click a link, then press Delete.
//! gestures.on_link_press(2);
//! assert_eq!(gestures.on_key_down(Key::Delete), GestureAction::DeleteLink(2));
//! ```
//!
//! ## Overlays
//!
//! The drag preview and the legend ghost are pure functions of the state
//! ([`GestureState::drag_preview`], [`GestureState::legend_ghost`]). Every path out of a drag
//! (release on a node, release on empty canvas, [`GestureState::cancel`], Delete, pressing
//! something else) clears them, so a host that re-reads both after each event never leaves a
//! stale overlay on screen.
//!
//! This crate is `no_std`.

#![no_std]

mod input;
mod machine;

pub use input::{Buttons, Key};
pub use machine::{Armed, DragPreview, GestureAction, GestureState, State};
