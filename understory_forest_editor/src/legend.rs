// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend registry: the node types a user can drop, and how they look.

use serde::{Deserialize, Serialize};

/// Presentation of one node type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// Node type this entry describes.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Fill colour, as understood by the renderer (e.g. a CSS colour).
    #[serde(default)]
    pub color: String,
    /// Full label shown in the legend.
    #[serde(default)]
    pub label: String,
    /// Abbreviated label shown inside nodes.
    #[serde(default)]
    pub short_label: String,
}

impl LegendEntry {
    /// A fully specified entry.
    pub fn new(
        node_type: impl Into<String>,
        color: impl Into<String>,
        label: impl Into<String>,
        short_label: impl Into<String>,
    ) -> Self {
        Self {
            node_type: node_type.into(),
            color: color.into(),
            label: label.into(),
            short_label: short_label.into(),
        }
    }

    /// An unstyled entry labelled with the type itself.
    pub fn bare(node_type: &str) -> Self {
        Self::new(node_type, "", node_type, node_type)
    }
}

/// Ordered set of [`LegendEntry`] keyed by node type.
///
/// An empty legend places no restriction on node types.
#[derive(Clone, Debug, Default)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

impl Legend {
    /// Build a legend. When a type is listed twice the first entry wins.
    pub fn new(entries: Vec<LegendEntry>) -> Self {
        Self { entries }
    }

    /// Entry for `node_type`, if registered.
    pub fn get(&self, node_type: &str) -> Option<&LegendEntry> {
        self.entries.iter().find(|e| e.node_type == node_type)
    }

    /// Returns `true` if nodes of `node_type` may be created.
    pub fn allows(&self, node_type: &str) -> bool {
        self.entries.is_empty() || self.get(node_type).is_some()
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Returns `true` if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_legend_allows_anything() {
        let legend = Legend::default();
        assert!(legend.allows("whatever"));
        assert!(legend.get("whatever").is_none());
    }

    #[test]
    fn first_entry_wins() {
        let legend = Legend::new(vec![
            LegendEntry::new("a", "red", "Alpha", "A"),
            LegendEntry::new("a", "blue", "Again", "A2"),
        ]);
        assert_eq!(legend.get("a").unwrap().color, "red");
        assert!(!legend.allows("b"));
    }

    #[test]
    fn parses_camel_case() {
        let entry: LegendEntry = serde_json::from_str(
            r##"{"type":"decision","color":"#f80","label":"Decision","shortLabel":"D"}"##,
        )
        .unwrap();
        assert_eq!(entry, LegendEntry::new("decision", "#f80", "Decision", "D"));
    }
}
