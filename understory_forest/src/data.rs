// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested interchange format accepted by [`crate::Forest::load`] and produced by
//! [`crate::Forest::export`].

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Deserializer, Serialize};

/// One node of the nested `{ type, children? }` interchange format.
///
/// `children` is omitted on output when empty. On input a missing field, an
/// explicit `null` and an empty array are all read as "no children".
///
/// ```rust
/// use understory_forest::NodeData;
///
/// let tree = NodeData::new("decision")
///     .with_child(NodeData::new("action"))
///     .with_child(NodeData::new("action"));
/// let json = serde_json::to_string(&tree).unwrap();
/// assert_eq!(
///     json,
///     r#"{"type":"decision","children":[{"type":"action"},{"type":"action"}]}"#
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    /// Legend key of the node.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Optional label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ordered children.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "nullable_children"
    )]
    pub children: Vec<NodeData>,
}

impl NodeData {
    /// A childless node of the given type.
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            name: None,
            children: Vec::new(),
        }
    }

    /// Builder: set the label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: append a child.
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }
}

fn nullable_children<'de, D>(deserializer: D) -> Result<Vec<NodeData>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<NodeData>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_empty_children_read_as_absent() {
        let a: NodeData = serde_json::from_str(r#"{"type":"a","children":null}"#).unwrap();
        let b: NodeData = serde_json::from_str(r#"{"type":"a","children":[]}"#).unwrap();
        let c: NodeData = serde_json::from_str(r#"{"type":"a"}"#).unwrap();
        assert_eq!(a, c);
        assert_eq!(b, c);
        assert_eq!(serde_json::to_string(&a).unwrap(), r#"{"type":"a"}"#);
    }

    #[test]
    fn name_survives_serialization() {
        let data = NodeData::new("leaf").with_name("Ship it");
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"type":"leaf","name":"Ship it"}"#);
        let back: NodeData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn count_includes_descendants() {
        let data = NodeData::new("a")
            .with_child(NodeData::new("b").with_child(NodeData::new("c")))
            .with_child(NodeData::new("d"));
        assert_eq!(data.count(), 4);
    }
}
