//! Induced subgraph extraction

use super::hierarchy::Hierarchy;
use super::store::Graph;
use super::types::{NodeId, Parent};
use rustc_hash::FxHashMap;
use tracing::debug;

impl<N: Clone, E: Clone, G: Clone> Graph<N, E, G> {
    /// Copy of this graph restricted to the nodes accepted by `predicate`
    ///
    /// Every edge whose endpoints both survive is kept with its label. In a
    /// compound graph each surviving node is re-parented to its nearest
    /// surviving ancestor (or the root). Options and the graph label carry
    /// over; default label providers do not. `self` is left untouched.
    pub fn filter_nodes<F>(&self, mut predicate: F) -> Graph<N, E, G>
    where
        F: FnMut(&str) -> bool,
    {
        let mut copy = Graph::new(self.options());
        copy.label = self.label.clone();

        for (v, label) in &self.nodes {
            if predicate(v.as_str()) {
                copy.upsert_node(v, label.clone());
            }
        }

        for (key, label) in &self.edges {
            if copy.has_node(key.v()) && copy.has_node(key.w()) {
                copy.upsert_edge(key.v(), key.w(), key.clone(), label.clone());
            }
        }

        if let Some(hierarchy) = &self.hierarchy {
            let mut memo = FxHashMap::default();
            let placements: Vec<(NodeId, Parent)> = copy
                .nodes
                .keys()
                .map(|v| {
                    let parent = surviving_parent(hierarchy, &copy, v, &mut memo);
                    (v.clone(), parent)
                })
                .collect();

            if let Some(copied) = copy.hierarchy.as_mut() {
                for (v, parent) in placements {
                    copied.attach(&v, parent);
                }
            }
        }

        debug!(
            "Filtered graph: kept {} of {} nodes, {} of {} edges",
            copy.node_count(),
            self.node_count(),
            copy.edge_count(),
            self.edge_count()
        );
        copy
    }
}

/// Nearest ancestor of `v` that survives in `copy`, or the root
///
/// Every removed ancestor passed on the way is memoized with the same
/// answer, so shared prefixes of the ancestor chains are walked once.
fn surviving_parent<'a, N, E, G>(
    hierarchy: &'a Hierarchy,
    copy: &Graph<N, E, G>,
    v: &str,
    memo: &mut FxHashMap<&'a str, Parent>,
) -> Parent {
    let mut skipped: Vec<&'a str> = Vec::new();
    let mut current = hierarchy.parent_of(v);

    let found = loop {
        match current {
            None | Some(Parent::Root) => break Parent::Root,
            Some(Parent::Node(p)) => {
                if copy.has_node(p) {
                    break Parent::Node(p.clone());
                }
                if let Some(known) = memo.get(p.as_str()) {
                    break known.clone();
                }
                skipped.push(p.as_str());
                current = hierarchy.parent_of(p);
            }
        }
    };

    for p in skipped {
        memo.insert(p, found.clone());
    }
    found
}

#[cfg(test)]
mod tests {
    use crate::graph::{Graph, GraphOptions};

    #[test]
    fn test_filter_keeps_induced_edges() {
        let mut g: Graph<&str, &str, &str> = Graph::default();
        g.set_graph("meta");
        g.set_node("a", "A");
        g.set_edge("a", "b", "ab");
        g.set_edge("b", "c", "bc");
        g.set_edge("a", "c", "ac");

        let sub = g.filter_nodes(|v| v != "b");
        assert_eq!(sub.nodes(), vec!["a", "c"]);
        assert_eq!(sub.edge_count(), 1);
        assert_eq!(sub.edge("a", "c", None), Some(&"ac"));
        assert_eq!(sub.node("a"), Some(&"A"));
        assert_eq!(sub.graph(), Some(&"meta"));
        assert_eq!(sub.successors("a"), Some(vec!["c"]));

        // Source untouched
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_filter_drops_edges_through_removed_nodes() {
        let mut g: Graph = Graph::default();
        g.set_path(["a", "b", "c"], None);
        let sub = g.filter_nodes(|v| v == "a" || v == "c");
        assert_eq!(sub.nodes(), vec!["a", "c"]);
        assert_eq!(sub.edge_count(), 0);
    }

    #[test]
    fn test_filter_preserves_options_and_multi_edges() {
        let opts = GraphOptions::new().directed(false).multigraph(true);
        let mut g: Graph<(), i32> = Graph::new(opts);
        g.set_edge_named("b", "a", Some("x"), Some(1)).unwrap();
        g.set_edge_named("a", "b", Some("y"), Some(2)).unwrap();
        g.ensure_edge("b", "c");

        let sub = g.filter_nodes(|v| v != "c");
        assert_eq!(sub.options(), opts);
        assert_eq!(sub.edge_count(), 2);
        assert_eq!(sub.edge("b", "a", Some("x")), Some(&1));
        assert_eq!(sub.edge("a", "b", Some("y")), Some(&2));
        assert_eq!(sub.neighbors("a"), Some(vec!["b"]));
    }

    #[test]
    fn test_filter_reparents_to_surviving_ancestor() {
        let mut g: Graph = Graph::new(GraphOptions::new().compound(true));
        g.set_parent("b", Some("a")).unwrap();
        g.set_parent("c", Some("b")).unwrap();
        g.set_parent("d", Some("b")).unwrap();
        g.set_parent("e", Some("x")).unwrap();

        let sub = g.filter_nodes(|v| v != "b" && v != "x");
        assert_eq!(sub.parent("c"), Some("a"));
        assert_eq!(sub.parent("d"), Some("a"));
        assert_eq!(sub.parent("e"), None);
        assert_eq!(sub.parent("a"), None);

        let mut kids = sub.children(Some("a")).unwrap();
        kids.sort_unstable();
        assert_eq!(kids, vec!["c", "d"]);

        // Source hierarchy unchanged
        assert_eq!(g.parent("c"), Some("b"));
    }

    #[test]
    fn test_filter_deep_chain_memoized() {
        let mut g: Graph = Graph::new(GraphOptions::new().compound(true));
        let ids: Vec<String> = (0..20).map(|i| format!("n{:02}", i)).collect();
        for pair in ids.windows(2) {
            g.set_parent(&pair[1], Some(pair[0].as_str())).unwrap();
        }

        // Keep only the root of the chain and every fifth node
        let sub = g.filter_nodes(|v| v == "n00" || v.ends_with('5') || v.ends_with('0'));
        assert_eq!(sub.parent("n05"), Some("n00"));
        assert_eq!(sub.parent("n10"), Some("n05"));
        assert_eq!(sub.parent("n15"), Some("n10"));
        assert_eq!(sub.parent("n00"), None);
    }
}
