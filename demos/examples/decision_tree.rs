// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edit a decision tree with scripted gestures and print the result.
//!
//! This example shows how to:
//! - configure a `TreeForestEditor` from JSON options and load a tree from JSON,
//! - drive it with the pointer and key events a UI would resolve,
//! - implement `Renderer` to follow changes by node id.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_forest_demos --example decision_tree`

use kurbo::{CubicBez, Point};
use understory_forest::{Changes, Forest, NodeId};
use understory_forest_editor::{
    EditorOptions, Legend, LegendEntry, Renderer, TemplateDrop, TreeForestEditor,
};
use understory_gesture::{Armed, Buttons, Key};

const OPTIONS: &str = r##"{
    "width": 800,
    "height": 400,
    "steps": 9,
    "maxChildren": 2,
    "legend": [
        { "type": "decision", "color": "#f39c12", "label": "Decision", "shortLabel": "D" },
        { "type": "action", "color": "#3498db", "label": "Action", "shortLabel": "A" },
        { "type": "end", "color": "#7f8c8d", "label": "End", "shortLabel": "E" }
    ]
}"##;

const TREE: &str = r#"{
    "type": "decision",
    "name": "Raining?",
    "children": [
        { "type": "action", "name": "Take umbrella" },
        {
            "type": "decision",
            "name": "Sunny?",
            "children": [{ "type": "action", "name": "Wear hat" }, { "type": "end" }]
        }
    ]
}"#;

/// Prints what a real renderer would redraw.
#[derive(Debug, Default)]
struct TextRenderer {
    frames: usize,
}

impl TextRenderer {
    fn label(forest: &Forest, legend: &Legend, id: NodeId) -> String {
        let Some(node) = forest.get(id) else {
            return id.to_string();
        };
        let short = legend
            .get(node.node_type())
            .map_or(node.node_type(), |e| e.short_label.as_str());
        match node.name() {
            Some(name) => format!("{id} [{short}] {name}"),
            None => format!("{id} [{short}]"),
        }
    }
}

impl Renderer for TextRenderer {
    fn render_forest(&mut self, forest: &Forest, changes: &Changes, legend: &Legend) {
        self.frames += 1;
        println!(
            "-- frame {}: +{:?} -{:?} moved {:?} restyled {:?}",
            self.frames, changes.added, changes.removed, changes.moved, changes.restyled
        );
        for root in forest.trees() {
            for id in forest.descendants(*root) {
                let Some(layout) = forest.get(id).and_then(|n| n.layout()) else {
                    continue;
                };
                let indent = "  ".repeat(layout.depth as usize);
                println!(
                    "   {indent}{} @ ({:.0}, {:.0})",
                    Self::label(forest, legend, id),
                    layout.position.x,
                    layout.position.y
                );
            }
        }
    }

    fn set_selection(&mut self, armed: Option<Armed<NodeId>>) {
        println!("   selection: {armed:?}");
    }

    fn show_drag_preview(&mut self, path: CubicBez) {
        println!("   preview to ({:.0}, {:.0})", path.p3.x, path.p3.y);
    }

    fn hide_drag_preview(&mut self) {
        println!("   preview hidden");
    }

    fn show_legend_ghost(&mut self, entry: &LegendEntry, position: Point) {
        println!("   ghost {} at ({:.0}, {:.0})", entry.label, position.x, position.y);
    }

    fn hide_legend_ghost(&mut self) {
        println!("   ghost hidden");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = EditorOptions::from_json(OPTIONS)?;
    let margin = options.margin;
    let to_screen = |p: Point| Point::new(p.x + margin.left, p.y + margin.top);
    let mut editor = TreeForestEditor::new(options, TextRenderer::default());
    let root = editor.load_json(TREE)?;

    let forest = editor.forest();
    let umbrella = forest.children_of(root)[0];
    let sunny = forest.children_of(root)[1];
    let hat = forest.children_of(sunny)[0];
    let position = |editor: &TreeForestEditor<TextRenderer>, id: NodeId| {
        editor
            .forest()
            .get(id)
            .and_then(|n| n.layout())
            .map_or(Point::ZERO, |l| to_screen(l.position))
    };

    println!("\n# drag 'Wear hat' onto 'Take umbrella'");
    editor.on_node_press(hat, position(&editor, hat));
    editor.on_pointer_move(position(&editor, umbrella), Buttons::PRIMARY);
    editor.on_node_release(umbrella);

    println!("\n# cut the link into 'Sunny?'");
    editor.on_link_press(sunny);
    editor.on_key_down(Key::from_code(Key::DELETE_CODE));

    println!("\n# drag 'Sunny?' back onto the root");
    editor.on_node_press(sunny, position(&editor, sunny));
    editor.on_node_release(root);

    println!("\n# drop an 'end' from the legend onto empty canvas");
    editor.on_legend_press("end", to_screen(Point::ZERO));
    editor.on_pointer_move(to_screen(Point::new(590.0, 330.0)), Buttons::PRIMARY);
    editor.on_legend_release(to_screen(Point::new(590.0, 330.0)));
    let fresh = editor.forest().trees().last().copied().unwrap_or(root);

    println!("\n# drag the new node onto the full root: rejected");
    editor.on_node_press(fresh, position(&editor, fresh));
    if !editor.on_node_release(root) {
        println!("   root already has two children");
    }

    println!("\n# restyle 'Take umbrella' as an end node");
    let target = editor
        .forest()
        .get(umbrella)
        .and_then(|n| n.layout())
        .map_or(Point::ZERO, |l| l.position);
    if let TemplateDrop::Restyled(id) = editor.create_from_template("end", target) {
        log::info!("restyled {id}");
    }

    println!("\n# click the new node, then delete it");
    editor.on_node_press(fresh, position(&editor, fresh));
    editor.on_node_release(fresh);
    editor.on_key_down(Key::Delete);

    println!("\n# export");
    let exported = editor.export_json()?;
    let pretty: serde_json::Value = serde_json::from_str(&exported)?;
    println!("{}", serde_json::to_string_pretty(&pretty)?);
    Ok(())
}
