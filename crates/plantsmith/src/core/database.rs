//! Core database trait for the intermediate diagram graph
//!
//! A database is built fresh for every translation call, filled by a parser
//! and read by a generator, then dropped.

use anyhow::Result;

/// Core trait for diagram databases
///
/// Stores the nodes and edges of one notation text. Each diagram kind has
/// its own node and edge types.
///
/// Node insertion is an upsert: a second `add_node` with the same id replaces
/// the stored kind and text but keeps the node's first-seen position.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Add or replace a node
    fn add_node(&mut self, node: Self::Node) -> Result<()>;

    /// Append an edge; duplicates are kept
    fn add_edge(&mut self, edge: Self::Edge) -> Result<()>;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes in first-seen order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges in insertion order
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;

    /// True when nothing was registered
    fn is_empty(&self) -> bool {
        self.node_count() == 0 && self.edge_count() == 0
    }
}
