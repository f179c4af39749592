//! Process-flow database implementation
//!
//! Stores action and decision nodes plus the ordered list of transitions.

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

use crate::core::Database;

/// Kind of a process-flow node, inferred from its bracket form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowNodeKind {
    /// `ID[text]`
    Action,
    /// `ID{text}`
    Decision,
}

impl fmt::Display for FlowNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowNodeKind::Action => write!(f, "action"),
            FlowNodeKind::Decision => write!(f, "decision"),
        }
    }
}

/// A node of the process flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode {
    pub id: String,
    pub text: String,
    pub kind: FlowNodeKind,
}

impl FlowNode {
    pub fn new(id: impl Into<String>, text: impl Into<String>, kind: FlowNodeKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
        }
    }

    pub fn action(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, FlowNodeKind::Action)
    }

    pub fn decision(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, FlowNodeKind::Decision)
    }
}

/// A directed transition between two node ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
}

impl FlowEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Process-flow database implementation
///
/// Nodes are upserted (last sighting wins for kind and text) and remember
/// their first-seen position. Edges may reference ids that never get
/// registered; such edges are kept here and skipped by the generator.
#[derive(Debug, Default)]
pub struct ProcessFlowDatabase {
    /// Nodes indexed by ID
    nodes: HashMap<String, FlowNode>,
    /// Node IDs in first-seen order
    node_order: Vec<String>,
    /// Edges in insertion order
    edges: Vec<FlowEdge>,
    /// How many times a sighting changed an existing node's kind
    reclassifications: usize,
}

impl ProcessFlowDatabase {
    /// Create a new empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// The first node registered, used as the flow's entry point
    pub fn first_node(&self) -> Option<&FlowNode> {
        self.node_order.first().and_then(|id| self.nodes.get(id))
    }

    /// Edges whose endpoints are both registered, with the nodes resolved
    pub fn resolved_edges(&self) -> impl Iterator<Item = (&FlowEdge, &FlowNode, &FlowNode)> {
        self.edges.iter().filter_map(move |edge| {
            match (self.nodes.get(&edge.from), self.nodes.get(&edge.to)) {
                (Some(from), Some(to)) => Some((edge, from, to)),
                _ => {
                    trace!(from = %edge.from, to = %edge.to, "Edge references unknown node");
                    None
                }
            }
        })
    }

    /// Number of sightings that changed a node's kind
    pub fn reclassification_count(&self) -> usize {
        self.reclassifications
    }
}

impl Database for ProcessFlowDatabase {
    type Node = FlowNode;
    type Edge = FlowEdge;

    fn add_node(&mut self, node: FlowNode) -> Result<()> {
        trace!(node_id = %node.id, node_text = %node.text, node_kind = %node.kind, "Adding node");
        match self.nodes.get(&node.id) {
            Some(existing) => {
                if existing.kind != node.kind {
                    debug!(
                        node_id = %node.id,
                        previous = %existing.kind,
                        current = %node.kind,
                        "Node reclassified, last sighting wins"
                    );
                    self.reclassifications += 1;
                }
            }
            None => self.node_order.push(node.id.clone()),
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    fn add_edge(&mut self, edge: FlowEdge) -> Result<()> {
        trace!(
            edge_from = %edge.from,
            edge_to = %edge.to,
            edge_label = ?edge.label,
            "Adding edge"
        );
        self.edges.push(edge);
        Ok(())
    }

    fn get_node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.get(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &FlowNode> {
        self.node_order.iter().filter_map(move |id| self.nodes.get(id))
    }

    fn edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges.iter()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.node_order.clear();
        self.edges.clear();
        self.reclassifications = 0;
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
