//! Actor-interaction database implementation
//!
//! Keeps two registries, actors and use cases. An identifier lives in exactly
//! one of them; a sighting in the other bracket form moves it.

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

use crate::core::Database;

/// Registry a node belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// `ID[text]`
    Actor,
    /// `ID((text))`
    UseCase,
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorKind::Actor => write!(f, "actor"),
            ActorKind::UseCase => write!(f, "usecase"),
        }
    }
}

/// Line style of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionKind {
    /// `-->`, an association
    #[default]
    Solid,
    /// `-.->`, an extend/include style dependency
    Dashed,
}

impl ConnectionKind {
    /// Map a notation connector to its kind
    pub fn from_connector(connector: &str) -> Option<Self> {
        match connector {
            "-->" => Some(ConnectionKind::Solid),
            "-.->" => Some(ConnectionKind::Dashed),
            _ => None,
        }
    }

    /// PlantUML arrow for this kind
    pub fn arrow(&self) -> &'static str {
        match self {
            ConnectionKind::Solid => "-->",
            ConnectionKind::Dashed => "..>",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionNode {
    pub id: String,
    pub text: String,
    pub kind: ActorKind,
}

impl InteractionNode {
    pub fn actor(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: ActorKind::Actor,
        }
    }

    pub fn use_case(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: ActorKind::UseCase,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionEdge {
    pub from: String,
    pub to: String,
    pub kind: ConnectionKind,
    pub label: Option<String>,
}

impl InteractionEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: ConnectionKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Actor-interaction database implementation
#[derive(Debug, Default)]
pub struct ActorInteractionDatabase {
    nodes: HashMap<String, InteractionNode>,
    actor_order: Vec<String>,
    use_case_order: Vec<String>,
    edges: Vec<InteractionEdge>,
    reclassifications: usize,
}

impl ActorInteractionDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn order_mut(&mut self, kind: ActorKind) -> &mut Vec<String> {
        match kind {
            ActorKind::Actor => &mut self.actor_order,
            ActorKind::UseCase => &mut self.use_case_order,
        }
    }

    /// Actors in registry order
    pub fn actors(&self) -> impl Iterator<Item = &InteractionNode> {
        self.actor_order.iter().filter_map(move |id| self.nodes.get(id))
    }

    /// Use cases in registry order
    pub fn use_cases(&self) -> impl Iterator<Item = &InteractionNode> {
        self.use_case_order
            .iter()
            .filter_map(move |id| self.nodes.get(id))
    }

    /// True when the id was classified in either registry
    pub fn is_classified(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Edges whose endpoints were both classified
    pub fn classified_edges(&self) -> impl Iterator<Item = &InteractionEdge> {
        self.edges.iter().filter(move |edge| {
            let keep = self.is_classified(&edge.from) && self.is_classified(&edge.to);
            if !keep {
                trace!(from = %edge.from, to = %edge.to, "Dropping edge with unclassified endpoint");
            }
            keep
        })
    }

    pub fn reclassification_count(&self) -> usize {
        self.reclassifications
    }
}

impl Database for ActorInteractionDatabase {
    type Node = InteractionNode;
    type Edge = InteractionEdge;

    fn add_node(&mut self, node: InteractionNode) -> Result<()> {
        trace!(node_id = %node.id, node_text = %node.text, node_kind = %node.kind, "Adding node");
        let previous = self.nodes.get(&node.id).map(|existing| existing.kind);
        match previous {
            Some(kind) if kind == node.kind => {}
            Some(kind) => {
                debug!(
                    node_id = %node.id,
                    previous = %kind,
                    current = %node.kind,
                    "Node moved between registries, last sighting wins"
                );
                self.order_mut(kind).retain(|id| id != &node.id);
                self.order_mut(node.kind).push(node.id.clone());
                self.reclassifications += 1;
            }
            None => self.order_mut(node.kind).push(node.id.clone()),
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    fn add_edge(&mut self, edge: InteractionEdge) -> Result<()> {
        trace!(
            edge_from = %edge.from,
            edge_to = %edge.to,
            edge_kind = ?edge.kind,
            edge_label = ?edge.label,
            "Adding edge"
        );
        self.edges.push(edge);
        Ok(())
    }

    fn get_node(&self, id: &str) -> Option<&InteractionNode> {
        self.nodes.get(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &InteractionNode> {
        self.actors().chain(self.use_cases())
    }

    fn edges(&self) -> impl Iterator<Item = &InteractionEdge> {
        self.edges.iter()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.actor_order.clear();
        self.use_case_order.clear();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registries_keep_order() {
        let mut db = ActorInteractionDatabase::new();
        db.add_node(InteractionNode::actor("U", "User")).unwrap();
        db.add_node(InteractionNode::use_case("L", "Login")).unwrap();
        db.add_node(InteractionNode::actor("A", "Admin")).unwrap();

        let actors: Vec<_> = db.actors().map(|n| n.id.as_str()).collect();
        let use_cases: Vec<_> = db.use_cases().map(|n| n.id.as_str()).collect();
        assert_eq!(actors, vec!["U", "A"]);
        assert_eq!(use_cases, vec!["L"]);
    }

    #[test]
    fn test_reclassification_moves_between_registries() {
        let mut db = ActorInteractionDatabase::new();
        db.add_node(InteractionNode::actor("X", "Thing")).unwrap();
        db.add_node(InteractionNode::actor("Y", "Other")).unwrap();
        db.add_node(InteractionNode::use_case("X", "Do thing")).unwrap();

        assert_eq!(db.actors().count(), 1);
        assert_eq!(db.use_cases().next().unwrap().text, "Do thing");
        assert_eq!(db.node_count(), 2);
        assert_eq!(db.reclassification_count(), 1);
    }

    #[test]
    fn test_same_kind_sighting_updates_text_in_place() {
        let mut db = ActorInteractionDatabase::new();
        db.add_node(InteractionNode::actor("A", "First")).unwrap();
        db.add_node(InteractionNode::actor("B", "Second")).unwrap();
        db.add_node(InteractionNode::actor("A", "Renamed")).unwrap();

        let actors: Vec<_> = db.actors().map(|n| n.text.as_str()).collect();
        assert_eq!(actors, vec!["Renamed", "Second"]);
        assert_eq!(db.reclassification_count(), 0);
    }

    #[test]
    fn test_classified_edges() {
        let mut db = ActorInteractionDatabase::new();
        db.add_node(InteractionNode::actor("U", "User")).unwrap();
        db.add_node(InteractionNode::use_case("L", "Login")).unwrap();
        db.add_edge(InteractionEdge::new("U", "L", ConnectionKind::Solid)).unwrap();
        db.add_edge(InteractionEdge::new("U", "Q", ConnectionKind::Dashed)).unwrap();

        assert_eq!(db.edge_count(), 2);
        assert_eq!(db.classified_edges().count(), 1);
    }

    #[test]
    fn test_connection_kind_arrows() {
        assert_eq!(ConnectionKind::from_connector("-->"), Some(ConnectionKind::Solid));
        assert_eq!(ConnectionKind::from_connector("-.->"), Some(ConnectionKind::Dashed));
        assert_eq!(ConnectionKind::from_connector("==>"), None);
        assert_eq!(ConnectionKind::Dashed.arrow(), "..>");
    }
}
