// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forest layout and link geometry.

use kurbo::{CubicBez, Point};
use understory_forest::{Forest, NodeId, NodeLayout};

use crate::scale::DepthScale;

/// Assign a [`NodeLayout`] to every node of the forest.
///
/// Horizontally, a node sits in the column of its depth (see
/// [`Forest::depth`]). Vertically, each leaf gets a slot and each parent is
/// centred between its first and last child:
/// - trees without an anchor share `height`, in proportion to their leaf counts,
///   stacked in tree order;
/// - anchored trees use `node_spacing` per leaf, centred on their anchor.
pub fn layout_forest(forest: &mut Forest, scale: &DepthScale, height: f64, node_spacing: f64) {
    let trees: Vec<NodeId> = forest.trees().to_vec();
    let leaves: Vec<usize> = trees.iter().map(|root| leaf_count(forest, *root)).collect();
    let anchors: Vec<Option<f64>> = trees
        .iter()
        .map(|root| forest.get(*root).and_then(|n| n.placement().anchor_y))
        .collect();

    let shared: usize = leaves
        .iter()
        .zip(&anchors)
        .filter(|(_, anchor)| anchor.is_none())
        .map(|(count, _)| *count)
        .sum();
    let shared_slot = if shared > 0 {
        height / shared as f64
    } else {
        node_spacing
    };

    let mut cursor = 0.0;
    for ((root, count), anchor) in trees.iter().zip(leaves).zip(anchors) {
        let (mut next_leaf, slot) = match anchor {
            Some(y) => (y - count as f64 * node_spacing / 2.0, node_spacing),
            None => {
                let top = cursor;
                cursor += count as f64 * shared_slot;
                (top, shared_slot)
            }
        };
        let column = forest.depth(*root).unwrap_or(0);
        place(forest, scale, *root, column, slot, &mut next_leaf);
    }
}

/// Horizontal S-curve from `from` to `to`, bending at the midpoint.
pub fn link_path(from: Point, to: Point) -> CubicBez {
    let mid_x = (from.x + to.x) / 2.0;
    CubicBez::new(from, Point::new(mid_x, from.y), Point::new(mid_x, to.y), to)
}

fn leaf_count(forest: &Forest, root: NodeId) -> usize {
    forest
        .descendants(root)
        .filter(|id| forest.children_of(*id).is_empty())
        .count()
}

/// Lay out the subtree at `id` and return its vertical position.
fn place(
    forest: &mut Forest,
    scale: &DepthScale,
    id: NodeId,
    depth: u32,
    slot: f64,
    next_leaf: &mut f64,
) -> f64 {
    let children = forest.children_of(id).to_vec();
    let y = if children.is_empty() {
        let y = *next_leaf + slot / 2.0;
        *next_leaf += slot;
        y
    } else {
        let mut first = None;
        let mut last = 0.0;
        for child in children {
            last = place(forest, scale, child, depth.saturating_add(1), slot, next_leaf);
            first.get_or_insert(last);
        }
        (first.unwrap_or(last) + last) / 2.0
    };
    forest.set_layout(
        id,
        NodeLayout {
            depth,
            position: Point::new(scale.column_x(depth), y),
        },
    );
    y
}
