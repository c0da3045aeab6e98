//! Default label providers
//!
//! A graph can hand out a label for nodes and edges created without one.
//! The provider is either a fixed value or a function of the new element's
//! identity, kept as a closed enum so it can be inspected without calling it.

use super::edge::EdgeObj;
use std::fmt;
use std::sync::Arc;

/// Label provider keyed by `K` (a node id or an edge descriptor)
pub enum DefaultLabel<K: ?Sized, T> {
    Constant(T),
    Computed(Arc<dyn Fn(&K) -> T + Send + Sync>),
}

/// Provider invoked with the id of a newly created node
pub type NodeLabelFn<N> = DefaultLabel<str, N>;

/// Provider invoked with the canonical descriptor of a newly created edge
pub type EdgeLabelFn<E> = DefaultLabel<EdgeObj, E>;

impl<K: ?Sized, T> DefaultLabel<K, T> {
    pub fn constant(value: T) -> Self {
        DefaultLabel::Constant(value)
    }

    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&K) -> T + Send + Sync + 'static,
    {
        DefaultLabel::Computed(Arc::new(f))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, DefaultLabel::Constant(_))
    }

    /// Produce a label for the element identified by `key`
    pub fn produce(&self, key: &K) -> T
    where
        T: Clone,
    {
        match self {
            DefaultLabel::Constant(value) => value.clone(),
            DefaultLabel::Computed(f) => f(key),
        }
    }
}

/// A provider stored on a graph, paired with the clone function its
/// `Constant` case needs. The pairing is made where `T: Clone` is known, so
/// creating nodes and edges never requires a `Clone` bound on labels.
pub(crate) struct LabelDefault<K: ?Sized, T> {
    provider: DefaultLabel<K, T>,
    clone: fn(&T) -> T,
}

impl<K: ?Sized, T: Clone> LabelDefault<K, T> {
    pub(crate) fn new(provider: DefaultLabel<K, T>) -> Self {
        LabelDefault {
            provider,
            clone: T::clone,
        }
    }
}

impl<K: ?Sized, T> LabelDefault<K, T> {
    pub(crate) fn provider(&self) -> &DefaultLabel<K, T> {
        &self.provider
    }

    pub(crate) fn produce(&self, key: &K) -> T {
        match &self.provider {
            DefaultLabel::Constant(value) => (self.clone)(value),
            DefaultLabel::Computed(f) => f(key),
        }
    }
}

impl<K: ?Sized, T: Clone> Clone for LabelDefault<K, T> {
    fn clone(&self) -> Self {
        LabelDefault {
            provider: self.provider.clone(),
            clone: self.clone,
        }
    }
}

impl<K: ?Sized, T: fmt::Debug> fmt::Debug for LabelDefault<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.provider.fmt(f)
    }
}

impl<K: ?Sized, T> From<T> for DefaultLabel<K, T> {
    fn from(value: T) -> Self {
        DefaultLabel::Constant(value)
    }
}

impl<K: ?Sized, T: Clone> Clone for DefaultLabel<K, T> {
    fn clone(&self) -> Self {
        match self {
            DefaultLabel::Constant(value) => DefaultLabel::Constant(value.clone()),
            DefaultLabel::Computed(f) => DefaultLabel::Computed(Arc::clone(f)),
        }
    }
}

impl<K: ?Sized, T: fmt::Debug> fmt::Debug for DefaultLabel<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultLabel::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            DefaultLabel::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
