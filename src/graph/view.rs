//! Read-only view over a live graph
//!
//! A `GraphView` borrows the graph it was taken from, so the borrow checker
//! rules out mutation through any other handle while the view exists. Use
//! `Graph::clone` when an owned snapshot is needed instead.

use super::store::Graph;
use std::fmt;
use std::ops::Deref;

/// Non-owning, read-only handle to a [`Graph`]
pub struct GraphView<'a, N = (), E = (), G = ()> {
    graph: &'a Graph<N, E, G>,
}

impl<'a, N, E, G> GraphView<'a, N, E, G> {
    /// The viewed graph, with the view's lifetime
    pub fn get(&self) -> &'a Graph<N, E, G> {
        self.graph
    }
}

impl<N, E, G> Graph<N, E, G> {
    /// Borrow this graph as a read-only view
    pub fn view(&self) -> GraphView<'_, N, E, G> {
        GraphView { graph: self }
    }
}

impl<N, E, G> Deref for GraphView<'_, N, E, G> {
    type Target = Graph<N, E, G>;

    fn deref(&self) -> &Self::Target {
        self.graph
    }
}

impl<N, E, G> Clone for GraphView<'_, N, E, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, E, G> Copy for GraphView<'_, N, E, G> {}

impl<N: fmt::Debug, E: fmt::Debug, G: fmt::Debug> fmt::Debug for GraphView<'_, N, E, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphView")
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{Graph, GraphView};

    fn count_sinks(view: GraphView<'_, &str>) -> usize {
        view.sinks().len()
    }

    #[test]
    fn test_view_exposes_queries() {
        let mut g: Graph<&str> = Graph::default();
        g.set_node("a", "A");
        g.ensure_edge("a", "b");

        let view = g.view();
        let copy = view;
        assert_eq!(view.node("a"), Some(&"A"));
        assert!(copy.has_edge("a", "b", None));
        assert_eq!(count_sinks(view), 1);
        assert_eq!(view.get().node_count(), 2);
        assert_eq!(format!("{:?}", view), "GraphView { nodes: 2, edges: 1 }");
    }

    #[test]
    fn test_view_sees_later_state() {
        let mut g: Graph = Graph::default();
        g.ensure_node("a");
        assert_eq!(g.view().node_count(), 1);
        g.ensure_node("b");
        assert_eq!(g.view().node_count(), 2);
    }
}
