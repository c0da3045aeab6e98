//! Graph container implementation
//!
//! This module implements a general-purpose in-memory graph with:
//! - Directed or undirected edges
//! - Optional parallel edges told apart by a name (multigraph)
//! - Optional parent/children forest over nodes (compound graph)
//! - Induced subgraph extraction and read-only views

pub mod edge;
pub mod filter;
pub mod hierarchy;
pub mod label;
pub mod store;
pub mod types;
pub mod view;

// Re-export main types
pub use edge::{EdgeKey, EdgeObj};
pub use label::{DefaultLabel, EdgeLabelFn, NodeLabelFn};
pub use store::{Graph, GraphError, GraphResult};
pub use types::{GraphOptions, NodeId, Parent};
pub use view::GraphView;
