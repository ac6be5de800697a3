// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract with the component that draws the forest.

use kurbo::{CubicBez, Point};
use understory_forest::{Changes, Forest, NodeId};
use understory_gesture::Armed;

use crate::legend::{Legend, LegendEntry};

/// Draws the forest and the transient gesture overlays.
///
/// The editor calls these synchronously from its event handlers. All
/// geometry is in canvas space (see [`crate::EditorOptions::canvas_to_screen`]).
/// Implementations must tolerate redundant calls: rendering an unchanged
/// forest, or hiding an overlay that is not shown, is harmless.
pub trait Renderer {
    /// Bring the drawing in line with `forest`.
    ///
    /// Every node carries a fresh [`understory_forest::NodeLayout`]. `changes`
    /// lists the ids that appeared, disappeared, moved, or changed type since
    /// the previous call; links are keyed by their child id.
    fn render_forest(&mut self, forest: &Forest, changes: &Changes, legend: &Legend);

    /// Highlight the selected node or link, or nothing.
    fn set_selection(&mut self, armed: Option<Armed<NodeId>>) {
        let _ = armed;
    }

    /// Show (or move) the edge that follows the pointer during a node drag.
    fn show_drag_preview(&mut self, path: CubicBez) {
        let _ = path;
    }

    /// Remove the drag preview edge.
    fn hide_drag_preview(&mut self) {}

    /// Show (or move) the ghost of a legend item being dragged.
    fn show_legend_ghost(&mut self, entry: &LegendEntry, position: Point) {
        let _ = (entry, position);
    }

    /// Remove the legend ghost.
    fn hide_legend_ghost(&mut self) {}
}

/// Draws nothing; for headless use.
impl Renderer for () {
    fn render_forest(&mut self, _forest: &Forest, _changes: &Changes, _legend: &Legend) {}
}
