//! The `edges`/`node` pagination envelope used by Shopify connections.

use serde::{Deserialize, Serialize};

/// A single wrapper around a connection node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<T> {
    /// The wrapped entity.
    pub node: T,
}

/// An ordered page of nodes, serialized as `{ "edges": [{ "node": T }] }`.
///
/// Pagination cursors are not requested by the gateway's queries, so only the
/// edges are modelled. A missing `edges` key decodes as an empty page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    /// Edges in upstream order.
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Connection<T> {
    /// An empty page.
    #[must_use]
    pub const fn empty() -> Self {
        Self { edges: Vec::new() }
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the page holds no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate over the nodes in order.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }

    /// Consume the page, returning the nodes in order.
    #[must_use]
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }

    /// Drop every edge past the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.edges.truncate(len);
    }
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> FromIterator<T> for Connection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().map(|node| Edge { node }).collect(),
        }
    }
}
