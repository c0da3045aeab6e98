//! Core type definitions for the graph container

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node identifier. Ids are compared and ordered as strings.
pub type NodeId = String;

/// Construction-time configuration of a [`Graph`](super::Graph)
///
/// Fixed for the lifetime of the container. Missing fields fall back to
/// their defaults when deserialized, so `{"compound": true}` is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Edges have a distinguished source and target
    pub directed: bool,

    /// More than one edge per endpoint pair, told apart by a name
    pub multigraph: bool,

    /// Nodes form a parent/children forest
    pub compound: bool,
}

impl GraphOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn multigraph(mut self, multigraph: bool) -> Self {
        self.multigraph = multigraph;
        self
    }

    pub fn compound(mut self, compound: bool) -> Self {
        self.compound = compound;
        self
    }
}

impl Default for GraphOptions {
    fn default() -> Self {
        GraphOptions {
            directed: true,
            multigraph: false,
            compound: false,
        }
    }
}

/// Parent slot of a node in a compound graph
///
/// `Root` is the implicit top of the forest. It is never addressable as a
/// real node, so no node id can collide with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parent {
    Root,
    Node(NodeId),
}

impl Parent {
    pub fn as_node(&self) -> Option<&str> {
        match self {
            Parent::Root => None,
            Parent::Node(id) => Some(id),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Parent::Root)
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parent::Root => write!(f, "<root>"),
            Parent::Node(id) => write!(f, "{}", id),
        }
    }
}

impl From<Option<&str>> for Parent {
    fn from(id: Option<&str>) -> Self {
        match id {
            Some(id) => Parent::Node(id.to_string()),
            None => Parent::Root,
        }
    }
}

impl From<&str> for Parent {
    fn from(id: &str) -> Self {
        Parent::Node(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = GraphOptions::default();
        assert!(opts.directed);
        assert!(!opts.multigraph);
        assert!(!opts.compound);
    }

    #[test]
    fn test_options_builder() {
        let opts = GraphOptions::new().directed(false).multigraph(true);
        assert!(!opts.directed);
        assert!(opts.multigraph);
        assert!(!opts.compound);
    }

    #[test]
    fn test_partial_options_deserialize() {
        let opts: GraphOptions = serde_json::from_str(r#"{"compound": true}"#).unwrap();
        assert_eq!(opts, GraphOptions::new().compound(true));
    }

    #[test]
    fn test_parent() {
        assert!(Parent::Root.is_root());
        assert_eq!(Parent::from(Some("a")).as_node(), Some("a"));
        assert_eq!(Parent::from(None), Parent::Root);
        assert_eq!(format!("{}", Parent::from("x")), "x");
        assert_eq!(format!("{}", Parent::Root), "<root>");
    }
}
