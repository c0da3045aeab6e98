//! Samyama Graphlib
//!
//! An in-memory graph container meant to sit underneath graph algorithms
//! (layout, traversal, scheduling) that need fast node/edge CRUD, adjacency
//! queries and subgraph extraction without doing their own bookkeeping.
//!
//! # Features
//!
//! - Directed and undirected graphs
//! - Multigraphs: parallel edges distinguished by a name
//! - Compound graphs: nodes nested in a parent/children forest
//! - Node, edge and graph-level labels with default label providers
//! - Induced subgraphs with hierarchy re-projection
//!
//! The container is single-threaded. Callers that share one across threads
//! must synchronize externally.
//!
//! ## Example Usage
//!
//! ```rust
//! use samyama_graphlib::{Graph, GraphOptions};
//!
//! let mut g: Graph<&str, u32> = Graph::new(GraphOptions::new().compound(true));
//!
//! g.set_node("a", "Alpha");
//! g.set_edge("a", "b", 1);
//! g.set_edge("b", "c", 2);
//! g.set_parent("c", Some("b")).unwrap();
//!
//! assert_eq!(g.successors("a"), Some(vec!["b"]));
//! assert_eq!(g.sources(), vec!["a"]);
//! assert_eq!(g.parent("c"), Some("b"));
//!
//! // Dropping "b" re-parents "c" to the nearest surviving ancestor (the root)
//! let sub = g.filter_nodes(|v| v != "b");
//! assert_eq!(sub.edge_count(), 0);
//! assert_eq!(sub.parent("c"), None);
//! ```

#![warn(clippy::all)]

pub mod graph;

// Re-export main types for convenience
pub use graph::{
    DefaultLabel, EdgeKey, EdgeLabelFn, EdgeObj, Graph, GraphError, GraphOptions, GraphResult,
    GraphView, NodeId, NodeLabelFn, Parent,
};
