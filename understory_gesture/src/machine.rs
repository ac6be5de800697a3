// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection and drag state machine for node-and-link diagrams.

use core::fmt::Debug;
use kurbo::Point;

use crate::input::{Buttons, Key};

/// The element currently selected and awaiting a completing gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Armed<K> {
    /// A node.
    Node(K),
    /// A link, identified by its child node.
    Link(K),
}

/// State of the gesture machine.
///
/// At most one node or link is armed at a time; arming anything clears the
/// previous arm.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum State<K, T> {
    /// Nothing selected.
    #[default]
    Idle,
    /// A node is selected.
    NodeArmed {
        /// The selected node.
        node: K,
        /// Live end of the drag preview while the press that armed the node is
        /// still held; `None` once the press ended.
        drag: Option<Point>,
    },
    /// A link is selected.
    LinkArmed(K),
    /// A legend template is being dragged over the canvas.
    LegendDrag {
        /// Template being dragged.
        template: T,
        /// Current pointer position.
        position: Point,
    },
}

/// Structural edit requested by a gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureAction<K, T> {
    /// Nothing to do.
    None,
    /// A drag from `pressed` ended on a different node `released`.
    Reparent {
        /// Node the drag started from.
        pressed: K,
        /// Node the drag ended on.
        released: K,
    },
    /// Delete the armed node and its subtree.
    DeleteNode(K),
    /// Cut the armed link; the value is the link's child.
    DeleteLink(K),
    /// A legend template was dropped.
    Drop {
        /// Dropped template.
        template: T,
        /// Pointer position at release.
        position: Point,
    },
}

impl<K, T> GestureAction<K, T> {
    /// Returns `true` for [`GestureAction::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Drag preview edge from a pressed node to the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragPreview<K> {
    /// Node the edge starts at.
    pub origin: K,
    /// Pointer position the edge ends at.
    pub pointer: Point,
}

/// Gesture state machine.
///
/// `K` identifies nodes (links are identified by their child node) and `T`
/// identifies legend templates. The machine never edits anything itself: the
/// `on_*` methods that can complete a gesture return a [`GestureAction`] for
/// the host to apply.
///
/// Transient overlays are derived from the state, so a host that redraws them
/// from [`GestureState::drag_preview`] and [`GestureState::legend_ghost`]
/// after every event can never leave one behind.
#[derive(Clone, Debug)]
pub struct GestureState<K, T> {
    state: State<K, T>,
}

impl<K, T> Default for GestureState<K, T> {
    fn default() -> Self {
        Self { state: State::Idle }
    }
}

impl<K: Clone + PartialEq + Debug, T: Clone + Debug> GestureState<K, T> {
    /// Create an idle machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &State<K, T> {
        &self.state
    }

    /// Selected node or link, if any.
    pub fn armed(&self) -> Option<Armed<K>> {
        match &self.state {
            State::NodeArmed { node, .. } => Some(Armed::Node(node.clone())),
            State::LinkArmed(link) => Some(Armed::Link(link.clone())),
            State::Idle | State::LegendDrag { .. } => None,
        }
    }

    /// Drag preview to show, if a node drag is live.
    pub fn drag_preview(&self) -> Option<DragPreview<K>> {
        match &self.state {
            State::NodeArmed {
                node,
                drag: Some(pointer),
            } => Some(DragPreview {
                origin: node.clone(),
                pointer: *pointer,
            }),
            _ => None,
        }
    }

    /// Legend template and pointer position to show a ghost at, if a legend
    /// drag is live.
    pub fn legend_ghost(&self) -> Option<(&T, Point)> {
        match &self.state {
            State::LegendDrag { template, position } => Some((template, *position)),
            _ => None,
        }
    }

    /// Pointer pressed on a node: arm it and start a drag preview at `position`.
    pub fn on_node_press(&mut self, node: K, position: Point) {
        log::trace!("arm node {node:?}");
        self.state = State::NodeArmed {
            node,
            drag: Some(position),
        };
    }

    /// Pointer released on a node.
    ///
    /// Ending a drag on another node requests a reparent and returns to idle.
    /// Ending it on the pressed node is a click: the node stays armed so a
    /// later Delete can act on it. Without a live drag nothing happens.
    pub fn on_node_release(&mut self, target: &K) -> GestureAction<K, T> {
        let State::NodeArmed {
            node,
            drag: drag @ Some(_),
        } = &mut self.state
        else {
            return GestureAction::None;
        };
        if node == target {
            *drag = None;
            return GestureAction::None;
        }
        let pressed = node.clone();
        log::trace!("drag from {pressed:?} released on {target:?}");
        self.state = State::Idle;
        GestureAction::Reparent {
            pressed,
            released: target.clone(),
        }
    }

    /// Pointer pressed on a link: arm it. Links get no drag preview.
    pub fn on_link_press(&mut self, link: K) {
        log::trace!("arm link {link:?}");
        self.state = State::LinkArmed(link);
    }

    /// Pointer moved.
    ///
    /// Moves the drag preview while the primary button is held, or the legend
    /// ghost during a legend drag. Returns `true` if an overlay moved.
    pub fn on_pointer_move(&mut self, position: Point, buttons: Buttons) -> bool {
        match &mut self.state {
            State::NodeArmed {
                drag: Some(pointer),
                ..
            } if buttons.contains(Buttons::PRIMARY) => {
                *pointer = position;
                true
            }
            State::LegendDrag {
                position: ghost, ..
            } => {
                *ghost = position;
                true
            }
            _ => false,
        }
    }

    /// Pointer pressed on empty canvas: drop any arm.
    pub fn on_background_press(&mut self) {
        if !matches!(self.state, State::LegendDrag { .. }) {
            self.state = State::Idle;
        }
    }

    /// Pointer released on empty canvas: end a node drag, keeping the arm.
    pub fn on_background_release(&mut self) {
        if let State::NodeArmed { drag, .. } = &mut self.state {
            *drag = None;
        }
    }

    /// Key pressed.
    ///
    /// Delete removes the armed node, or cuts the armed link, and returns to
    /// idle. Every other key, and Delete with nothing armed, does nothing.
    pub fn on_key_down(&mut self, key: Key) -> GestureAction<K, T> {
        if key != Key::Delete {
            return GestureAction::None;
        }
        let action = match &self.state {
            State::NodeArmed { node, .. } => GestureAction::DeleteNode(node.clone()),
            State::LinkArmed(link) => GestureAction::DeleteLink(link.clone()),
            State::Idle | State::LegendDrag { .. } => return GestureAction::None,
        };
        self.state = State::Idle;
        action
    }

    /// Pointer pressed on a legend item: start dragging its template.
    pub fn on_legend_press(&mut self, template: T, position: Point) {
        log::trace!("legend drag of {template:?}");
        self.state = State::LegendDrag { template, position };
    }

    /// Pointer released at the end of a legend drag: request a drop.
    pub fn on_legend_release(&mut self, position: Point) -> GestureAction<K, T> {
        match core::mem::replace(&mut self.state, State::Idle) {
            State::LegendDrag { template, .. } => GestureAction::Drop { template, position },
            other => {
                self.state = other;
                GestureAction::None
            }
        }
    }

    /// Abort any drag without acting on it, for example when pointer capture
    /// is lost. A node drag keeps its arm; a legend drag returns to idle.
    ///
    /// Returns `true` if a drag was aborted.
    pub fn cancel(&mut self) -> bool {
        match &mut self.state {
            State::NodeArmed { drag, .. } => drag.take().is_some(),
            State::LegendDrag { .. } => {
                self.state = State::Idle;
                true
            }
            State::Idle | State::LinkArmed(_) => false,
        }
    }

    /// Return to idle unconditionally, e.g. after the forest was replaced.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Machine = GestureState<u32, &'static str>;

    const P: Point = Point::new(10.0, 20.0);

    #[test]
    fn press_arms_node_with_preview() {
        let mut g = Machine::new();
        g.on_node_press(1, P);
        assert_eq!(g.armed(), Some(Armed::Node(1)));
        assert_eq!(
            g.drag_preview(),
            Some(DragPreview {
                origin: 1,
                pointer: P
            })
        );
    }

    #[test]
    fn release_on_other_node_requests_reparent() {
        let mut g = Machine::new();
        g.on_node_press(1, P);
        let action = g.on_node_release(&2);
        assert_eq!(
            action,
            GestureAction::Reparent {
                pressed: 1,
                released: 2
            }
        );
        assert_eq!(g.state(), &State::Idle);
        assert!(g.drag_preview().is_none());
    }

    #[test]
    fn click_keeps_node_armed_for_delete() {
        let mut g = Machine::new();
        g.on_node_press(1, P);
        assert!(g.on_node_release(&1).is_none());
        assert!(g.drag_preview().is_none(), "preview ends with the press");
        assert_eq!(g.armed(), Some(Armed::Node(1)));
        assert_eq!(g.on_key_down(Key::Delete), GestureAction::DeleteNode(1));
        assert_eq!(g.state(), &State::Idle);
    }

    #[test]
    fn release_without_drag_does_nothing() {
        let mut g = Machine::new();
        assert!(g.on_node_release(&2).is_none());
        g.on_node_press(1, P);
        g.on_background_release();
        assert!(g.on_node_release(&2).is_none(), "drag already ended");
        assert_eq!(g.armed(), Some(Armed::Node(1)));
    }

    #[test]
    fn move_needs_primary_button() {
        let mut g = Machine::new();
        g.on_node_press(1, P);
        let to = Point::new(50.0, 60.0);
        assert!(!g.on_pointer_move(to, Buttons::SECONDARY));
        assert_eq!(g.drag_preview().unwrap().pointer, P);
        assert!(g.on_pointer_move(to, Buttons::PRIMARY));
        assert_eq!(g.drag_preview().unwrap().pointer, to);
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut g = Machine::new();
        assert!(!g.on_pointer_move(P, Buttons::PRIMARY));
        g.on_link_press(3);
        assert!(!g.on_pointer_move(P, Buttons::PRIMARY));
    }

    #[test]
    fn arming_is_mutually_exclusive() {
        let mut g = Machine::new();
        g.on_node_press(1, P);
        g.on_link_press(7);
        assert_eq!(g.armed(), Some(Armed::Link(7)));
        assert!(g.drag_preview().is_none());
        g.on_node_press(2, P);
        assert_eq!(g.armed(), Some(Armed::Node(2)));
    }

    #[test]
    fn delete_on_link_cuts_link() {
        let mut g = Machine::new();
        g.on_link_press(7);
        assert_eq!(g.on_key_down(Key::Other(13)), GestureAction::None);
        assert_eq!(g.armed(), Some(Armed::Link(7)));
        assert_eq!(g.on_key_down(Key::Delete), GestureAction::DeleteLink(7));
        assert_eq!(g.armed(), None);
    }

    #[test]
    fn delete_when_idle_is_noop() {
        let mut g = Machine::new();
        assert!(g.on_key_down(Key::Delete).is_none());
    }

    #[test]
    fn background_press_disarms() {
        let mut g = Machine::new();
        g.on_node_press(1, P);
        g.on_background_press();
        assert_eq!(g.state(), &State::Idle);
        assert!(g.drag_preview().is_none());
    }

    #[test]
    fn legend_drag_drops_template() {
        let mut g = Machine::new();
        g.on_node_press(1, P);
        g.on_legend_press("action", P);
        assert_eq!(g.armed(), None, "legend drag clears the arm");
        let to = Point::new(300.0, 120.0);
        assert!(g.on_pointer_move(to, Buttons::empty()));
        assert_eq!(g.legend_ghost(), Some((&"action", to)));
        // Releasing over a node is still a legend drop.
        assert!(g.on_node_release(&1).is_none());
        assert_eq!(
            g.on_legend_release(to),
            GestureAction::Drop {
                template: "action",
                position: to
            }
        );
        assert_eq!(g.state(), &State::Idle);
        assert!(g.legend_ghost().is_none());
    }

    #[test]
    fn legend_release_without_drag_is_noop() {
        let mut g = Machine::new();
        g.on_link_press(4);
        assert!(g.on_legend_release(P).is_none());
        assert_eq!(g.armed(), Some(Armed::Link(4)));
    }

    #[test]
    fn cancel_aborts_drags() {
        let mut g = Machine::new();
        g.on_node_press(1, P);
        assert!(g.cancel());
        assert!(g.drag_preview().is_none());
        assert_eq!(g.armed(), Some(Armed::Node(1)));
        assert!(!g.cancel(), "nothing left to abort");

        g.on_legend_press("end", P);
        assert!(g.cancel());
        assert!(g.legend_ghost().is_none());
        assert_eq!(g.state(), &State::Idle);
    }
}
