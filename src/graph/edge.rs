//! Edge descriptors and edge identity keys
//!
//! An edge is identified by `(v, w, name)`. In an undirected graph the two
//! endpoints are reordered so the lexicographically smaller id comes first,
//! which makes `(a, b)` and `(b, a)` the same edge. That normalization is a
//! pure function applied before any key is built.

use super::types::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge descriptor: enough to identify an edge, `{v, w, name?}`
///
/// Descriptors handed out by a graph are always canonical for that graph's
/// directedness. An empty name is omitted from the descriptor, though the
/// edge's key still tells it apart from the unnamed edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeObj {
    /// Source node (the smaller id for undirected edges)
    pub v: NodeId,

    /// Target node
    pub w: NodeId,

    /// Discriminator for parallel edges in a multigraph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EdgeObj {
    pub fn new(v: impl Into<NodeId>, w: impl Into<NodeId>) -> Self {
        EdgeObj {
            v: v.into(),
            w: w.into(),
            name: None,
        }
    }

    pub fn named(v: impl Into<NodeId>, w: impl Into<NodeId>, name: impl Into<String>) -> Self {
        EdgeObj::new(v, w).with_name(Some(name.into()))
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|n| !n.is_empty());
        self
    }

    /// Check if this edge touches `node` at either end
    pub fn is_incident(&self, node: &str) -> bool {
        self.v == node || self.w == node
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint
    pub fn other(&self, node: &str) -> Option<&str> {
        if self.v == node {
            Some(self.w.as_str())
        } else if self.w == node {
            Some(self.v.as_str())
        } else {
            None
        }
    }
}

impl fmt::Display for EdgeObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} -> {} [{}]", self.v, self.w, name),
            None => write!(f, "{} -> {}", self.v, self.w),
        }
    }
}

/// Canonical identity of an edge within one graph
///
/// Only constructible through [`EdgeKey::encode`] and friends, so every key
/// in storage has already gone through undirected endpoint normalization.
/// `name: None` never equals any `Some(_)`, so the triple space is
/// collision-free without reserving sentinel bytes in ids. The empty name is
/// a real name here: it is only dropped from the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    obj: EdgeObj,
    empty_name: bool,
}

impl EdgeKey {
    /// Build the identity key for `(v, w, name)`
    pub fn encode(directed: bool, v: &str, w: &str, name: Option<&str>) -> Self {
        EdgeKey {
            obj: to_descriptor(directed, v, w, name),
            empty_name: name == Some(""),
        }
    }

    /// Build the identity key for an existing descriptor
    pub fn from_obj(directed: bool, obj: &EdgeObj) -> Self {
        Self::encode(directed, &obj.v, &obj.w, obj.name.as_deref())
    }

    /// The canonical descriptor this key stands for
    pub fn as_obj(&self) -> &EdgeObj {
        &self.obj
    }

    pub fn into_obj(self) -> EdgeObj {
        self.obj
    }

    pub fn v(&self) -> &str {
        &self.obj.v
    }

    pub fn w(&self) -> &str {
        &self.obj.w
    }

    /// The name this key was built with, `Some("")` included
    pub fn name(&self) -> Option<&str> {
        if self.empty_name {
            Some("")
        } else {
            self.obj.name.as_deref()
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} -> {} [{}]", self.v(), self.w(), name),
            None => write!(f, "{} -> {}", self.v(), self.w()),
        }
    }
}

/// Order endpoints for storage: undirected graphs put the smaller id first
pub fn normalize_endpoints<'a>(directed: bool, v: &'a str, w: &'a str) -> (&'a str, &'a str) {
    if !directed && v > w {
        (w, v)
    } else {
        (v, w)
    }
}

/// Canonical descriptor for `(v, w, name)`
pub fn to_descriptor(directed: bool, v: &str, w: &str, name: Option<&str>) -> EdgeObj {
    let (v, w) = normalize_endpoints(directed, v, w);
    EdgeObj::new(v, w).with_name(name.map(str::to_string))
}
