// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editor: forest, gestures, and renderer wired together.

use kurbo::{Affine, Point};
use understory_forest::{Forest, NodeData, NodeId, Placement, Reparent};
use understory_gesture::{Armed, Buttons, GestureAction, GestureState, Key};

use crate::error::EditorError;
use crate::layout::{layout_forest, link_path};
use crate::legend::{Legend, LegendEntry};
use crate::options::EditorOptions;
use crate::render::Renderer;
use crate::scale::DepthScale;

/// Result of [`TreeForestEditor::create_from_template`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateDrop {
    /// A new root was created.
    Created(NodeId),
    /// The drop landed on an existing node, which took the dropped type.
    Restyled(NodeId),
    /// The drop landed on a node that already has the dropped type.
    Matched(NodeId),
    /// The type is not in the legend; nothing happened.
    Ignored,
}

/// What the renderer currently shows, so overlays can be hidden exactly once.
#[derive(Clone, Copy, Debug, Default)]
struct Overlays {
    selection: Option<Armed<NodeId>>,
    preview: bool,
    ghost: bool,
}

/// Interactive tree-forest editor.
///
/// Owns a [`Forest`], translates gestures into edits on it, and keeps a
/// [`Renderer`] in sync: after each edit it lays the forest out, commits the
/// change summary and calls [`Renderer::render_forest`]; after each event it
/// shows or hides the drag preview, the legend ghost, and the selection to
/// match the gesture state.
///
/// Event handlers take screen-space points and map them to canvas space
/// through the margin in [`EditorOptions`].
///
/// ## Example
///
/// ```rust
/// use kurbo::Point;
/// use understory_forest::NodeData;
/// use understory_forest_editor::{EditorOptions, TreeForestEditor};
/// use understory_gesture::Key;
///
/// let mut editor = TreeForestEditor::new(EditorOptions::default(), ());
/// let root = editor
///     .load(&NodeData::new("decision").with_child(NodeData::new("action")))
///     .unwrap();
/// let action = editor.forest().children_of(root)[0];
///
/// // Select the link into `action` and delete it.
/// editor.on_link_press(action);
/// assert!(editor.on_key_down(Key::Delete));
/// assert_eq!(editor.forest().trees(), &[root, action]);
///
/// // Drag `action` back onto the root.
/// editor.on_node_press(action, Point::new(100.0, 100.0));
/// assert!(editor.on_node_release(root));
/// assert_eq!(editor.forest().trees(), &[root]);
/// ```
#[derive(Debug)]
pub struct TreeForestEditor<R> {
    forest: Forest,
    gestures: GestureState<NodeId, String>,
    options: EditorOptions,
    legend: Legend,
    scale: DepthScale,
    screen_to_canvas: Affine,
    renderer: R,
    overlays: Overlays,
}

impl<R: Renderer> TreeForestEditor<R> {
    /// Create an editor with an empty forest.
    pub fn new(options: EditorOptions, renderer: R) -> Self {
        let legend = Legend::new(options.legend.clone());
        let scale = DepthScale::new(options.steps, options.width);
        let screen_to_canvas = options.canvas_to_screen().inverse();
        Self {
            forest: Forest::new(),
            gestures: GestureState::new(),
            options,
            legend,
            scale,
            screen_to_canvas,
            renderer,
            overlays: Overlays::default(),
        }
    }

    /// The forest being edited.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Options the editor was created with.
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// The legend registry.
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// The horizontal depth grid.
    pub fn scale(&self) -> &DepthScale {
        &self.scale
    }

    /// Current gesture state.
    pub fn gestures(&self) -> &GestureState<NodeId, String> {
        &self.gestures
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Consume the editor and return the renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Replace the forest with the tree in `data` and redraw everything.
    ///
    /// Any gesture in progress is dropped. On error the forest is unchanged.
    pub fn load(&mut self, data: &NodeData) -> Result<NodeId, EditorError> {
        let root = self.forest.load(data)?;
        self.gestures.reset();
        self.redraw();
        self.sync_overlays();
        Ok(root)
    }

    /// [`TreeForestEditor::load`] from a JSON `{ "type": .., "children": [..] }` document.
    pub fn load_json(&mut self, json: &str) -> Result<NodeId, EditorError> {
        let data: NodeData = serde_json::from_str(json).map_err(EditorError::Json)?;
        self.load(&data)
    }

    /// Every tree, in root order.
    pub fn export(&self) -> Vec<NodeData> {
        self.forest.export()
    }

    /// [`TreeForestEditor::export`] as a JSON array.
    pub fn export_json(&self) -> Result<String, EditorError> {
        serde_json::to_string(&self.export()).map_err(EditorError::Json)
    }

    /// Lay out, commit, and render the forest.
    ///
    /// Called after every edit; calling it again without edits renders an
    /// empty change summary.
    pub fn redraw(&mut self) {
        layout_forest(
            &mut self.forest,
            &self.scale,
            self.options.height,
            self.options.node_spacing,
        );
        let changes = self.forest.commit();
        self.renderer
            .render_forest(&self.forest, &changes, &self.legend);
    }

    /// Make the shallower of `a` and `b` the parent of the other, unless that
    /// parent is already at the children cap. On equal depth `a` is the parent.
    pub fn reparent(&mut self, a: NodeId, b: NodeId) -> Reparent {
        let outcome = self.forest.reparent(a, b, self.options.max_children);
        match outcome {
            Reparent::Moved { parent, child } => {
                log::debug!("moved {child} under {parent}");
                self.redraw();
            }
            other => log::debug!("reparent of {a} and {b} ignored: {other:?}"),
        }
        outcome
    }

    /// Delete a node with its subtree.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        let deleted = self.forest.delete_node(id);
        if deleted {
            self.redraw();
        }
        deleted
    }

    /// Cut the link into `id`, turning its subtree into a new tree.
    pub fn delete_link(&mut self, id: NodeId) -> bool {
        let cut = self.forest.delete_link(id);
        if cut {
            self.redraw();
        }
        cut
    }

    /// Drop a node of `node_type` at canvas position `position`.
    ///
    /// Near an existing node (within `restyle_radius`) the node takes the new
    /// type. Elsewhere a new root is created in the column under `position`.
    pub fn create_from_template(&mut self, node_type: &str, position: Point) -> TemplateDrop {
        if !self.legend.allows(node_type) {
            log::warn!("ignoring drop of unknown type {node_type:?}");
            return TemplateDrop::Ignored;
        }
        if let Some(id) = self
            .forest
            .nearest_within(position, self.options.restyle_radius)
        {
            if !self.forest.set_type(id, node_type) {
                return TemplateDrop::Matched(id);
            }
            self.redraw();
            return TemplateDrop::Restyled(id);
        }
        let placement = Placement {
            column: self.scale.column_at(position.x),
            anchor_y: Some(position.y),
        };
        let id = self.forest.insert_root(node_type, placement);
        log::debug!("created {id} of type {node_type:?} in column {}", placement.column);
        self.redraw();
        TemplateDrop::Created(id)
    }

    /// Pointer pressed on a node.
    pub fn on_node_press(&mut self, id: NodeId, screen: Point) {
        if self.forest.contains(id) {
            let position = self.screen_to_canvas * screen;
            self.gestures.on_node_press(id, position);
        }
        self.sync_overlays();
    }

    /// Pointer released on a node. Returns `true` if the forest changed.
    pub fn on_node_release(&mut self, id: NodeId) -> bool {
        let action = self.gestures.on_node_release(&id);
        self.finish(action)
    }

    /// Pointer pressed on the link into `child`.
    pub fn on_link_press(&mut self, child: NodeId) {
        if self.forest.parent_of(child).is_some() {
            self.gestures.on_link_press(child);
        }
        self.sync_overlays();
    }

    /// Pointer moved.
    pub fn on_pointer_move(&mut self, screen: Point, buttons: Buttons) {
        let position = self.screen_to_canvas * screen;
        if self.gestures.on_pointer_move(position, buttons) {
            self.sync_overlays();
        }
    }

    /// Pointer pressed on empty canvas.
    pub fn on_background_press(&mut self) {
        self.gestures.on_background_press();
        self.sync_overlays();
    }

    /// Pointer released on empty canvas.
    pub fn on_background_release(&mut self) {
        self.gestures.on_background_release();
        self.sync_overlays();
    }

    /// Key pressed. Returns `true` if the forest changed.
    pub fn on_key_down(&mut self, key: Key) -> bool {
        let action = self.gestures.on_key_down(key);
        self.finish(action)
    }

    /// Pointer pressed on the legend item for `node_type`.
    pub fn on_legend_press(&mut self, node_type: &str, screen: Point) {
        if self.legend.allows(node_type) {
            let position = self.screen_to_canvas * screen;
            self.gestures.on_legend_press(node_type.into(), position);
        } else {
            log::warn!("ignoring drag of unknown type {node_type:?}");
        }
        self.sync_overlays();
    }

    /// Pointer released at the end of a legend drag. Returns `true` if the
    /// forest changed.
    pub fn on_legend_release(&mut self, screen: Point) -> bool {
        let position = self.screen_to_canvas * screen;
        let action = self.gestures.on_legend_release(position);
        self.finish(action)
    }

    /// Abort the current drag, e.g. when pointer capture is lost.
    pub fn cancel_gesture(&mut self) {
        self.gestures.cancel();
        self.sync_overlays();
    }

    fn finish(&mut self, action: GestureAction<NodeId, String>) -> bool {
        let changed = match action {
            GestureAction::None => false,
            GestureAction::Reparent { pressed, released } => {
                self.reparent(pressed, released).is_moved()
            }
            GestureAction::DeleteNode(id) => self.delete_node(id),
            GestureAction::DeleteLink(id) => self.delete_link(id),
            GestureAction::Drop { template, position } => {
                matches!(
                    self.create_from_template(&template, position),
                    TemplateDrop::Created(_) | TemplateDrop::Restyled(_)
                )
            }
        };
        self.sync_overlays();
        changed
    }

    /// Make selection, drag preview, and legend ghost match the gesture state.
    fn sync_overlays(&mut self) {
        let armed_id = match self.gestures.armed() {
            Some(Armed::Node(id) | Armed::Link(id)) => Some(id),
            None => None,
        };
        if let Some(id) = armed_id
            && !self.forest.contains(id)
        {
            self.gestures.reset();
        }

        let armed = self.gestures.armed();
        if armed != self.overlays.selection {
            self.renderer.set_selection(armed);
            self.overlays.selection = armed;
        }

        let preview = self.gestures.drag_preview().and_then(|preview| {
            let origin = self.forest.get(preview.origin)?.layout()?.position;
            Some(link_path(origin, preview.pointer))
        });
        match preview {
            Some(path) => {
                self.renderer.show_drag_preview(path);
                self.overlays.preview = true;
            }
            None if self.overlays.preview => {
                self.renderer.hide_drag_preview();
                self.overlays.preview = false;
            }
            None => {}
        }

        let ghost = self.gestures.legend_ghost().map(|(node_type, position)| {
            let entry = self
                .legend
                .get(node_type)
                .cloned()
                .unwrap_or_else(|| LegendEntry::bare(node_type));
            (entry, Point::new(self.scale.snap_x(position.x), position.y))
        });
        match ghost {
            Some((entry, position)) => {
                self.renderer.show_legend_ghost(&entry, position);
                self.overlays.ghost = true;
            }
            None if self.overlays.ghost => {
                self.renderer.hide_legend_ghost();
                self.overlays.ghost = false;
            }
            None => {}
        }
    }
}
