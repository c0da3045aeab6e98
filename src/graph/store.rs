//! In-memory graph container
//!
//! Uses hash maps for O(1) lookup performance:
//! - nodes: NodeId -> label
//! - edges: EdgeKey -> label (the key carries the canonical descriptor)
//! - incoming / outgoing: NodeId -> set of EdgeKey (per-node edge enumeration)
//! - predecessors / successors: NodeId -> neighbor -> multiplicity
//!
//! All four adjacency maps hold an entry for exactly the live nodes. Every
//! mutation validates first and then updates storage and adjacency together,
//! so a failed call leaves the graph untouched.

use super::edge::{EdgeKey, EdgeObj};
use super::hierarchy::Hierarchy;
use super::label::{EdgeLabelFn, LabelDefault, NodeLabelFn};
use super::types::{GraphOptions, NodeId};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::{debug, trace};

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub(crate) type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Setting {parent} as parent of {v} would create a cycle")]
    Cycle { v: NodeId, parent: NodeId },

    #[error("Cannot set named edge {v} -> {w} [{name}] when multigraph = false")]
    UnsupportedNamedEdge { v: NodeId, w: NodeId, name: String },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph container with optional multi-edges and compound hierarchy
///
/// `N`, `E` and `G` are the node, edge and graph-level label types. Labels are
/// optional: an element created without one, and without a default provider,
/// has no label.
#[derive(Debug, Clone)]
pub struct Graph<N = (), E = (), G = ()> {
    options: GraphOptions,

    /// Graph-level label
    pub(super) label: Option<G>,

    default_node_label: Option<LabelDefault<str, N>>,
    default_edge_label: Option<LabelDefault<EdgeObj, E>>,

    /// Node storage (insertion ordered)
    pub(super) nodes: FxIndexMap<NodeId, Option<N>>,

    /// Edge storage, keyed by canonical identity
    pub(super) edges: FxIndexMap<EdgeKey, Option<E>>,

    /// Edges ending at each node
    incoming: FxHashMap<NodeId, FxIndexSet<EdgeKey>>,

    /// Edges starting at each node
    outgoing: FxHashMap<NodeId, FxIndexSet<EdgeKey>>,

    /// node -> source -> number of parallel edges source -> node
    predecessors: FxHashMap<NodeId, FxIndexMap<NodeId, usize>>,

    /// node -> target -> number of parallel edges node -> target
    successors: FxHashMap<NodeId, FxIndexMap<NodeId, usize>>,

    /// Parent/children forest, present only for compound graphs
    pub(super) hierarchy: Option<Hierarchy>,
}

impl<N, E, G> Graph<N, E, G> {
    /// Create an empty graph
    pub fn new(options: GraphOptions) -> Self {
        Graph {
            options,
            label: None,
            default_node_label: None,
            default_edge_label: None,
            nodes: FxIndexMap::default(),
            edges: FxIndexMap::default(),
            incoming: FxHashMap::default(),
            outgoing: FxHashMap::default(),
            predecessors: FxHashMap::default(),
            successors: FxHashMap::default(),
            hierarchy: options.compound.then(Hierarchy::new),
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn is_compound(&self) -> bool {
        self.options.compound
    }

    // === Graph label ===

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.label = Some(label);
        self
    }

    pub fn graph(&self) -> Option<&G> {
        self.label.as_ref()
    }

    pub fn graph_mut(&mut self) -> Option<&mut G> {
        self.label.as_mut()
    }

    // === Defaults ===

    /// Label given to nodes created without one
    ///
    /// Accepts a constant (`g.set_default_node_label(0)`) or a
    /// [`DefaultLabel::computed`](super::DefaultLabel::computed) provider.
    pub fn set_default_node_label(&mut self, default: impl Into<NodeLabelFn<N>>) -> &mut Self
    where
        N: Clone,
    {
        self.default_node_label = Some(LabelDefault::new(default.into()));
        self
    }

    /// Label given to edges created without one
    ///
    /// A computed provider receives the canonical descriptor, so for an
    /// undirected edge `v` is the smaller id whatever order the caller used.
    pub fn set_default_edge_label(&mut self, default: impl Into<EdgeLabelFn<E>>) -> &mut Self
    where
        E: Clone,
    {
        self.default_edge_label = Some(LabelDefault::new(default.into()));
        self
    }

    pub fn default_node_label(&self) -> Option<&NodeLabelFn<N>> {
        self.default_node_label.as_ref().map(LabelDefault::provider)
    }

    pub fn default_edge_label(&self) -> Option<&EdgeLabelFn<E>> {
        self.default_edge_label.as_ref().map(LabelDefault::provider)
    }

    // === Node queries ===

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Label of a node; `None` if the node is unknown or has no label
    pub fn node(&self, id: &str) -> Option<&N> {
        self.nodes.get(id).and_then(Option::as_ref)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.nodes.get_mut(id).and_then(Option::as_mut)
    }

    /// Nodes without incoming edges
    pub fn sources(&self) -> Vec<&str> {
        self.nodes()
            .into_iter()
            .filter(|v| self.incoming.get(*v).map_or(true, |set| set.is_empty()))
            .collect()
    }

    /// Nodes without outgoing edges
    pub fn sinks(&self) -> Vec<&str> {
        self.nodes()
            .into_iter()
            .filter(|v| self.outgoing.get(*v).map_or(true, |set| set.is_empty()))
            .collect()
    }

    pub fn predecessors(&self, id: &str) -> Option<Vec<&str>> {
        self.predecessors
            .get(id)
            .map(|preds| preds.keys().map(String::as_str).collect())
    }

    pub fn successors(&self, id: &str) -> Option<Vec<&str>> {
        self.successors
            .get(id)
            .map(|succs| succs.keys().map(String::as_str).collect())
    }

    /// Predecessors followed by successors, without duplicates
    pub fn neighbors(&self, id: &str) -> Option<Vec<&str>> {
        let preds = self.predecessors.get(id)?;
        let succs = self.successors.get(id)?;
        let mut seen = FxHashSet::default();
        Some(
            preds
                .keys()
                .chain(succs.keys())
                .map(String::as_str)
                .filter(|v| seen.insert(*v))
                .collect(),
        )
    }

    /// Directed graphs: no successors. Undirected graphs: no neighbors.
    /// Unknown nodes are not leaves.
    pub fn is_leaf(&self, id: &str) -> bool {
        let neighbors = if self.options.directed {
            self.successors(id)
        } else {
            self.neighbors(id)
        };
        neighbors.is_some_and(|n| n.is_empty())
    }

    // === Edge queries ===

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> Vec<&EdgeObj> {
        self.edges.keys().map(EdgeKey::as_obj).collect()
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edges
            .contains_key(&EdgeKey::encode(self.options.directed, v, w, name))
    }

    pub fn has_edge_obj(&self, obj: &EdgeObj) -> bool {
        self.edges
            .contains_key(&EdgeKey::from_obj(self.options.directed, obj))
    }

    /// Label of an edge; `None` if the edge is unknown or has no label
    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        self.edge_by_key(&EdgeKey::encode(self.options.directed, v, w, name))
    }

    pub fn edge_obj(&self, obj: &EdgeObj) -> Option<&E> {
        self.edge_by_key(&EdgeKey::from_obj(self.options.directed, obj))
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        let key = EdgeKey::encode(self.options.directed, v, w, name);
        self.edges.get_mut(&key).and_then(Option::as_mut)
    }

    fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        self.edges.get(key).and_then(Option::as_ref)
    }

    /// Edges ending at `v`, optionally only those starting at `u`
    pub fn in_edges(&self, v: &str, u: Option<&str>) -> Option<Vec<&EdgeObj>> {
        let keys = self.incoming.get(v)?;
        Some(
            keys.iter()
                .map(EdgeKey::as_obj)
                .filter(|e| u.map_or(true, |u| e.v == u))
                .collect(),
        )
    }

    /// Edges starting at `v`, optionally only those ending at `w`
    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Option<Vec<&EdgeObj>> {
        let keys = self.outgoing.get(v)?;
        Some(
            keys.iter()
                .map(EdgeKey::as_obj)
                .filter(|e| w.map_or(true, |w| e.w == w))
                .collect(),
        )
    }

    /// In-edges then out-edges of `v`, optionally only those shared with `w`
    pub fn node_edges(&self, v: &str, w: Option<&str>) -> Option<Vec<&EdgeObj>> {
        let mut edges = self.in_edges(v, w)?;
        edges.extend(self.out_edges(v, w)?);
        Some(edges)
    }

    // === Removal ===

    /// Remove a node with all incident edges; returns whether it existed
    ///
    /// In a compound graph the node's children are re-homed to the root.
    pub fn remove_node(&mut self, id: &str) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }

        if let Some(hierarchy) = self.hierarchy.as_mut() {
            let orphans = hierarchy.remove(id);
            if !orphans.is_empty() {
                trace!("Re-homed {} children of {} to root", orphans.len(), id);
            }
        }

        let incident: Vec<EdgeKey> = self
            .incoming
            .get(id)
            .into_iter()
            .chain(self.outgoing.get(id))
            .flatten()
            .cloned()
            .collect();
        for key in &incident {
            self.remove_edge_key(key);
        }

        self.incoming.remove(id);
        self.outgoing.remove(id);
        self.predecessors.remove(id);
        self.successors.remove(id);
        self.nodes.swap_remove(id);

        trace!("Removed node {} and {} incident edges", id, incident.len());
        true
    }

    /// Remove an edge; returns whether it existed
    pub fn remove_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> bool {
        let key = EdgeKey::encode(self.options.directed, v, w, name);
        self.remove_edge_key(&key)
    }

    pub fn remove_edge_obj(&mut self, obj: &EdgeObj) -> bool {
        let key = EdgeKey::from_obj(self.options.directed, obj);
        self.remove_edge_key(&key)
    }

    fn remove_edge_key(&mut self, key: &EdgeKey) -> bool {
        if self.edges.swap_remove(key).is_none() {
            return false;
        }

        let (v, w) = (key.v(), key.w());
        if let Some(preds) = self.predecessors.get_mut(w) {
            decrement_or_remove(preds, v);
        }
        if let Some(succs) = self.successors.get_mut(v) {
            decrement_or_remove(succs, w);
        }
        if let Some(in_w) = self.incoming.get_mut(w) {
            in_w.swap_remove(key);
        }
        if let Some(out_v) = self.outgoing.get_mut(v) {
            out_v.swap_remove(key);
        }

        trace!("Removed edge {}", key);
        true
    }

    // === Node mutation ===

    /// Create a node or replace its label
    pub fn set_node(&mut self, id: &str, label: N) -> &mut Self {
        self.upsert_node(id, Some(label));
        self
    }

    /// Create a node if it does not exist; an existing label is left alone
    pub fn ensure_node(&mut self, id: &str) -> &mut Self {
        self.upsert_node(id, None);
        self
    }

    /// `set_node` (with `Some`) or `ensure_node` (with `None`) over many ids
    pub fn set_nodes<I, S>(&mut self, ids: I, label: Option<N>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        N: Clone,
    {
        for id in ids {
            self.upsert_node(id.as_ref(), label.clone());
        }
        self
    }

    /// Insert `id` if unknown (with `label` or the default), otherwise
    /// overwrite its label only when one is given.
    pub(super) fn upsert_node(&mut self, id: &str, label: Option<N>) {
        if let Some(slot) = self.nodes.get_mut(id) {
            if label.is_some() {
                *slot = label;
            }
            return;
        }

        let label = label.or_else(|| self.default_node_label.as_ref().map(|d| d.produce(id)));
        self.nodes.insert(id.to_string(), label);
        self.incoming.insert(id.to_string(), FxIndexSet::default());
        self.outgoing.insert(id.to_string(), FxIndexSet::default());
        self.predecessors.insert(id.to_string(), FxIndexMap::default());
        self.successors.insert(id.to_string(), FxIndexMap::default());
        if let Some(hierarchy) = self.hierarchy.as_mut() {
            hierarchy.insert(id);
        }
        trace!("Created node {}", id);
    }

    // === Edge mutation ===

    /// Create an unnamed edge `v -> w` or replace its label
    pub fn set_edge(&mut self, v: &str, w: &str, label: E) -> &mut Self {
        let key = EdgeKey::encode(self.options.directed, v, w, None);
        self.upsert_edge(v, w, key, Some(label));
        self
    }

    /// Create an unnamed edge `v -> w` if it does not exist
    pub fn ensure_edge(&mut self, v: &str, w: &str) -> &mut Self {
        let key = EdgeKey::encode(self.options.directed, v, w, None);
        self.upsert_edge(v, w, key, None);
        self
    }

    /// Create or update the edge `(v, w, name)`
    ///
    /// A `None` label leaves an existing edge's label alone and gives a new
    /// edge the default label. Naming an edge requires a multigraph, and the
    /// empty name counts as a name.
    pub fn set_edge_named(
        &mut self,
        v: &str,
        w: &str,
        name: Option<&str>,
        label: Option<E>,
    ) -> GraphResult<&mut Self> {
        let key = EdgeKey::encode(self.options.directed, v, w, name);
        if !self.edges.contains_key(&key) && !self.options.multigraph {
            if let Some(name) = name {
                debug!("Rejected named edge {} in a non-multigraph", key);
                return Err(GraphError::UnsupportedNamedEdge {
                    v: v.to_string(),
                    w: w.to_string(),
                    name: name.to_string(),
                });
            }
        }
        self.upsert_edge(v, w, key, label);
        Ok(self)
    }

    /// [`set_edge_named`](Self::set_edge_named) taking a descriptor
    pub fn set_edge_obj(&mut self, obj: &EdgeObj, label: Option<E>) -> GraphResult<&mut Self> {
        self.set_edge_named(&obj.v, &obj.w, obj.name.as_deref(), label)
    }

    /// Connect each consecutive pair in `ids`
    pub fn set_path<I, S>(&mut self, ids: I, label: Option<E>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: Clone,
    {
        let mut prev: Option<S> = None;
        for id in ids {
            if let Some(v) = &prev {
                let (v, w) = (v.as_ref(), id.as_ref());
                let key = EdgeKey::encode(self.options.directed, v, w, None);
                self.upsert_edge(v, w, key, label.clone());
            }
            prev = Some(id);
        }
        self
    }

    /// `v` and `w` are the endpoints as the caller gave them; nodes are
    /// auto-created in that order before the canonical key is stored.
    pub(super) fn upsert_edge(&mut self, v: &str, w: &str, key: EdgeKey, label: Option<E>) {
        if let Some(slot) = self.edges.get_mut(&key) {
            if label.is_some() {
                *slot = label;
            }
            return;
        }

        self.upsert_node(v, None);
        self.upsert_node(w, None);

        let label = label.or_else(|| {
            self.default_edge_label
                .as_ref()
                .map(|d| d.produce(key.as_obj()))
        });

        let (v, w) = (key.v(), key.w());
        if let Some(preds) = self.predecessors.get_mut(w) {
            *preds.entry(v.to_string()).or_insert(0) += 1;
        }
        if let Some(succs) = self.successors.get_mut(v) {
            *succs.entry(w.to_string()).or_insert(0) += 1;
        }
        if let Some(in_w) = self.incoming.get_mut(w) {
            in_w.insert(key.clone());
        }
        if let Some(out_v) = self.outgoing.get_mut(v) {
            out_v.insert(key.clone());
        }

        trace!("Created edge {}", key);
        self.edges.insert(key, label);
    }
}

impl<N, E, G> Default for Graph<N, E, G> {
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

fn decrement_or_remove(counts: &mut FxIndexMap<NodeId, usize>, k: &str) {
    let remove = match counts.get_mut(k) {
        Some(n) => {
            *n -= 1;
            *n == 0
        }
        None => false,
    };
    if remove {
        counts.swap_remove(k);
    }
}
