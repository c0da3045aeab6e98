//! Compound node hierarchy
//!
//! Nodes of a compound graph form a forest under an implicit root. The
//! parent relation over real nodes is kept acyclic: `set_parent` walks the
//! proposed parent's ancestor chain and refuses before touching anything if
//! the child shows up in it.

use super::store::{FxIndexSet, Graph, GraphError, GraphResult};
use super::types::{NodeId, Parent};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Parent/children bookkeeping for a compound graph
#[derive(Debug, Clone, Default)]
pub(crate) struct Hierarchy {
    /// node -> parent (Root when detached)
    parent: FxHashMap<NodeId, Parent>,

    /// node -> direct children
    children: FxHashMap<NodeId, FxIndexSet<NodeId>>,

    /// Direct children of the root
    root_children: FxIndexSet<NodeId>,
}

impl Hierarchy {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a new node under the root
    pub(crate) fn insert(&mut self, v: &str) {
        self.parent.insert(v.to_string(), Parent::Root);
        self.children.insert(v.to_string(), FxIndexSet::default());
        self.root_children.insert(v.to_string());
    }

    /// Drop a node, moving its direct children under the root.
    /// Returns the re-homed children.
    pub(crate) fn remove(&mut self, v: &str) -> Vec<NodeId> {
        self.detach(v);
        self.parent.remove(v);
        let orphans: Vec<NodeId> = self
            .children
            .remove(v)
            .map(|set| set.into_iter().collect())
            .unwrap_or_default();
        for child in &orphans {
            self.attach(child, Parent::Root);
        }
        orphans
    }

    pub(crate) fn parent_of(&self, v: &str) -> Option<&Parent> {
        self.parent.get(v)
    }

    /// Direct children of `v`, or of the root when `v` is `None`
    pub(crate) fn children_of(&self, v: Option<&str>) -> Option<&FxIndexSet<NodeId>> {
        match v {
            None => Some(&self.root_children),
            Some(v) => self.children.get(v),
        }
    }

    /// Whether `target` is `start` or one of its ancestors
    pub(crate) fn chain_contains(&self, start: &str, target: &str) -> bool {
        let mut current = Some(start);
        while let Some(ancestor) = current {
            if ancestor == target {
                return true;
            }
            current = self.parent.get(ancestor).and_then(Parent::as_node);
        }
        false
    }

    /// Move `v` under `parent`. Both must already be registered.
    pub(crate) fn attach(&mut self, v: &str, parent: Parent) {
        self.detach(v);
        match &parent {
            Parent::Root => {
                self.root_children.insert(v.to_string());
            }
            Parent::Node(p) => {
                self.children
                    .entry(p.clone())
                    .or_default()
                    .insert(v.to_string());
            }
        }
        self.parent.insert(v.to_string(), parent);
    }

    fn detach(&mut self, v: &str) {
        match self.parent.get(v) {
            Some(Parent::Root) => {
                self.root_children.shift_remove(v);
            }
            Some(Parent::Node(p)) => {
                if let Some(siblings) = self.children.get_mut(p) {
                    siblings.shift_remove(v);
                }
            }
            None => {}
        }
    }
}

impl<N, E, G> Graph<N, E, G> {
    /// Parent of `id`; `None` for top-level nodes, unknown nodes, and
    /// non-compound graphs
    pub fn parent(&self, id: &str) -> Option<&str> {
        self.hierarchy.as_ref()?.parent_of(id)?.as_node()
    }

    /// Direct children of `id`, or of the root when `id` is `None`
    ///
    /// A non-compound graph treats every node as a child of the root and
    /// reports real nodes as childless. Unknown nodes give `None`.
    pub fn children(&self, id: Option<&str>) -> Option<Vec<&str>> {
        match (&self.hierarchy, id) {
            (Some(hierarchy), id) => hierarchy
                .children_of(id)
                .map(|set| set.iter().map(String::as_str).collect()),
            (None, None) => Some(self.nodes()),
            (None, Some(id)) => self.has_node(id).then(Vec::new),
        }
    }

    /// Move `v` under `parent`, or under the root when `parent` is `None`
    ///
    /// Missing nodes are created. Fails without changing anything when the
    /// graph is not compound or when `v` would become its own ancestor.
    pub fn set_parent(&mut self, v: &str, parent: Option<&str>) -> GraphResult<&mut Self> {
        let Some(hierarchy) = self.hierarchy.as_ref() else {
            debug!("Rejected set_parent({}) on a non-compound graph", v);
            return Err(GraphError::InvalidOperation(
                "Cannot set parent in a non-compound graph".to_string(),
            ));
        };

        let parent = match parent {
            None => Parent::Root,
            Some(p) => {
                if hierarchy.chain_contains(p, v) {
                    debug!("Rejected set_parent({}, {}): cycle", v, p);
                    return Err(GraphError::Cycle {
                        v: v.to_string(),
                        parent: p.to_string(),
                    });
                }
                self.upsert_node(p, None);
                Parent::Node(p.to_string())
            }
        };

        self.upsert_node(v, None);
        trace!("Set parent of {} to {}", v, parent);
        if let Some(hierarchy) = self.hierarchy.as_mut() {
            hierarchy.attach(v, parent);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{Graph, GraphError, GraphOptions};

    fn compound() -> Graph<&'static str> {
        Graph::new(GraphOptions::new().compound(true))
    }

    #[test]
    fn test_new_nodes_are_top_level() {
        let mut g = compound();
        g.ensure_node("a");
        g.ensure_node("b");
        assert_eq!(g.parent("a"), None);
        assert_eq!(g.children(None), Some(vec!["a", "b"]));
        assert_eq!(g.children(Some("a")), Some(vec![]));
        assert_eq!(g.children(Some("missing")), None);
    }

    #[test]
    fn test_set_parent_creates_nodes() {
        let mut g = compound();
        g.set_parent("child", Some("parent")).unwrap();
        assert!(g.has_node("child"));
        assert!(g.has_node("parent"));
        assert_eq!(g.parent("child"), Some("parent"));
        assert_eq!(g.children(Some("parent")), Some(vec!["child"]));
        assert_eq!(g.children(None), Some(vec!["parent"]));
    }

    #[test]
    fn test_move_between_parents() {
        let mut g = compound();
        g.set_parent("c", Some("p1")).unwrap();
        g.set_parent("c", Some("p2")).unwrap();
        assert_eq!(g.parent("c"), Some("p2"));
        assert_eq!(g.children(Some("p1")), Some(vec![]));
        assert_eq!(g.children(Some("p2")), Some(vec!["c"]));

        g.set_parent("c", None).unwrap();
        assert_eq!(g.parent("c"), None);
        assert_eq!(g.children(Some("p2")), Some(vec![]));
        assert!(g.children(None).unwrap().contains(&"c"));
    }

    #[test]
    fn test_self_parent_is_cycle() {
        let mut g = compound();
        let err = g.set_parent("a", Some("a")).map(|_| ()).unwrap_err();
        assert_eq!(
            err,
            GraphError::Cycle {
                v: "a".to_string(),
                parent: "a".to_string(),
            }
        );
        assert!(!g.has_node("a"));
    }

    #[test]
    fn test_cycle_rejected_and_state_kept() {
        let mut g = compound();
        g.set_parent("x", Some("y")).unwrap();
        g.set_parent("y", Some("z")).unwrap();

        let result = g.set_parent("z", Some("x")).map(|_| ());
        assert!(matches!(result, Err(GraphError::Cycle { .. })));
        assert_eq!(g.parent("x"), Some("y"));
        assert_eq!(g.parent("y"), Some("z"));
        assert_eq!(g.parent("z"), None);
    }

    #[test]
    fn test_non_compound_rejects_set_parent() {
        let mut g: Graph = Graph::default();
        let result = g.set_parent("a", Some("b")).map(|_| ());
        assert!(matches!(result, Err(GraphError::InvalidOperation(_))));
        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn test_non_compound_children() {
        let mut g: Graph = Graph::default();
        g.ensure_node("a");
        g.ensure_node("b");
        assert_eq!(g.children(None), Some(vec!["a", "b"]));
        assert_eq!(g.children(Some("a")), Some(vec![]));
        assert_eq!(g.children(Some("missing")), None);
        assert_eq!(g.parent("a"), None);
    }

    #[test]
    fn test_remove_node_rehomes_children_only() {
        let mut g = compound();
        g.set_parent("b", Some("a")).unwrap();
        g.set_parent("c", Some("b")).unwrap();
        g.set_parent("d", Some("c")).unwrap();

        g.remove_node("b");
        assert_eq!(g.parent("c"), None);
        assert_eq!(g.parent("d"), Some("c"));
        assert_eq!(g.children(Some("a")), Some(vec![]));
        assert_eq!(g.children(Some("b")), None);
        let mut top = g.children(None).unwrap();
        top.sort_unstable();
        assert_eq!(top, vec!["a", "c"]);
    }

    #[test]
    fn test_set_parent_keeps_labels() {
        let mut g = compound();
        g.set_node("a", "A");
        g.set_node("p", "P");
        g.set_parent("a", Some("p")).unwrap();
        assert_eq!(g.node("a"), Some(&"A"));
        assert_eq!(g.node("p"), Some(&"P"));
    }

    #[test]
    fn test_set_parent_with_owned_labels() {
        struct Owned(Vec<u8>);

        let mut g: Graph<Owned> = Graph::new(GraphOptions::new().compound(true));
        g.set_node("leaf", Owned(vec![1, 2]));
        g.set_parent("leaf", Some("group")).unwrap();
        assert_eq!(g.parent("leaf"), Some("group"));
        assert_eq!(g.node("leaf").map(|o| o.0.len()), Some(2));

        g.remove_node("group");
        assert_eq!(g.parent("leaf"), None);
    }
}
