//! Actor-interaction PlantUML generator
//!
//! Output is laid out in three runs: actor declarations, use-case
//! declarations, then relationships in source order, separated by blank lines.

use std::fmt::Write as _;

use anyhow::Result;
use tracing::{debug, span, Level};

use super::database::ActorInteractionDatabase;
use crate::core::{Database, Generator};

const HEADER: &str = "@startuml
!theme plain
title Use Case Diagram
left to right direction
skinparam actor {
  BackgroundColor LightGreen
  BorderColor DarkGreen
}
skinparam usecase {
  BackgroundColor LightBlue
  BorderColor DarkBlue
}";

const SKELETON: &str = "@startuml\ntitle Use Case Diagram\n@enduml";

/// Actor-interaction generator implementation
pub struct ActorInteractionGenerator;

impl ActorInteractionGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ActorInteractionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<ActorInteractionDatabase> for ActorInteractionGenerator {
    fn generate(&self, database: &ActorInteractionDatabase) -> Result<String> {
        let generate_span = span!(
            Level::DEBUG,
            "generate_actor_interaction",
            node_count = database.node_count(),
            edge_count = database.edge_count()
        );
        let _enter = generate_span.enter();

        let mut output = String::from(HEADER);
        output.push('\n');

        for actor in database.actors() {
            let _ = writeln!(output, "actor \"{}\" as {}", actor.text, actor.id);
        }
        output.push('\n');

        for use_case in database.use_cases() {
            let _ = writeln!(output, "usecase \"{}\" as {}", use_case.text, use_case.id);
        }
        output.push('\n');

        let mut relationships = 0usize;
        for edge in database.classified_edges() {
            let arrow = edge.kind.arrow();
            match &edge.label {
                Some(label) => {
                    let _ = writeln!(output, "{} {} \"{}\" {}", edge.from, arrow, label, edge.to);
                }
                None => {
                    let _ = writeln!(output, "{} {} {}", edge.from, arrow, edge.to);
                }
            }
            relationships += 1;
        }

        output.push_str("@enduml");

        debug!(
            relationships,
            dropped = database.edge_count() - relationships,
            "Generated actor interaction"
        );
        Ok(output)
    }

    fn skeleton(&self) -> String {
        SKELETON.to_string()
    }

    fn name(&self) -> &'static str {
        "actor-interaction"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::actor_interaction::{ConnectionKind, InteractionEdge, InteractionNode};

    #[test]
    fn test_layout() {
        let mut db = ActorInteractionDatabase::new();
        db.add_node(InteractionNode::actor("U", "User")).unwrap();
        db.add_node(InteractionNode::use_case("L", "Login")).unwrap();
        db.add_node(InteractionNode::use_case("R", "Reset")).unwrap();
        db.add_edge(InteractionEdge::new("U", "L", ConnectionKind::Solid)).unwrap();
        db.add_edge(
            InteractionEdge::new("R", "L", ConnectionKind::Dashed).with_label("extends"),
        )
        .unwrap();

        let output = ActorInteractionGenerator::new().generate(&db).unwrap();
        let expected = format!(
            "{HEADER}\nactor \"User\" as U\n\nusecase \"Login\" as L\nusecase \"Reset\" as R\n\nU --> L\nR ..> \"extends\" L\n@enduml"
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_empty_registries_keep_separators() {
        let mut db = ActorInteractionDatabase::new();
        db.add_node(InteractionNode::use_case("L", "Login")).unwrap();
        let output = ActorInteractionGenerator::new().generate(&db).unwrap();
        assert!(output.ends_with("}\n\nusecase \"Login\" as L\n\n@enduml"));
    }

    #[test]
    fn test_unclassified_edges_are_dropped() {
        let mut db = ActorInteractionDatabase::new();
        db.add_node(InteractionNode::actor("U", "User")).unwrap();
        db.add_edge(InteractionEdge::new("U", "Ghost", ConnectionKind::Solid)).unwrap();
        let output = ActorInteractionGenerator::new().generate(&db).unwrap();
        assert!(!output.contains("Ghost"));
    }

    #[test]
    fn test_skeleton() {
        assert_eq!(
            ActorInteractionGenerator::new().skeleton(),
            "@startuml\ntitle Use Case Diagram\n@enduml"
        );
    }
}
