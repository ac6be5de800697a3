// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor configuration.

use kurbo::{Affine, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::legend::LegendEntry;

/// Space between the canvas edge and the drawing area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 20.0,
            bottom: 10.0,
            left: 20.0,
        }
    }
}

/// Options recognised by [`crate::TreeForestEditor`].
///
/// Every field has a default, so a JSON document only needs the fields it
/// changes:
///
/// ```rust
/// use understory_forest_editor::EditorOptions;
///
/// let options = EditorOptions::from_json(
///     r#"{ "maxChildren": 2, "legend": [{ "type": "decision", "label": "Decision" }] }"#,
/// )
/// .unwrap();
/// assert_eq!(options.max_children, Some(2));
/// assert_eq!(options.steps, 20);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorOptions {
    /// Width of the drawing area.
    pub width: f64,
    /// Height of the drawing area.
    pub height: f64,
    /// Number of depth columns across `width`.
    pub steps: u32,
    /// Space around the drawing area.
    pub margin: Margin,
    /// Animation length in milliseconds, for renderers that animate.
    pub duration: u64,
    /// Node types and their presentation.
    pub legend: Vec<LegendEntry>,
    /// Cap on the number of children a reparent may create; `None` for no cap.
    pub max_children: Option<usize>,
    /// Dropping a legend item within this distance of a node restyles the
    /// node instead of creating a new one.
    pub restyle_radius: f64,
    /// Vertical distance between leaves of trees that were dropped or cut
    /// loose on the canvas.
    pub node_spacing: f64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            steps: 20,
            margin: Margin::default(),
            duration: 750,
            legend: Vec::new(),
            max_children: None,
            restyle_radius: 10.0,
            node_spacing: 40.0,
        }
    }
}

impl EditorOptions {
    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        serde_json::from_str(json).map_err(EditorError::Options)
    }

    /// Builder: set the legend.
    pub fn with_legend(mut self, legend: Vec<LegendEntry>) -> Self {
        self.legend = legend;
        self
    }

    /// Builder: set the children cap.
    pub fn with_max_children(mut self, max_children: usize) -> Self {
        self.max_children = Some(max_children);
        self
    }

    /// Transform from canvas space (where layout happens) to screen space.
    pub fn canvas_to_screen(&self) -> Affine {
        Affine::translate(Vec2::new(self.margin.left, self.margin.top))
    }
}
