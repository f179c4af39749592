//! Actor-interaction parser implementation

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::chumsky_parser::{ChumskyInteractionParser, InteractionSegment};
use super::database::{
    ActorInteractionDatabase, ActorKind, ConnectionKind, InteractionEdge, InteractionNode,
};
use crate::core::notation::{is_skippable_line, split_on_connectors};
use crate::core::{Database, Parser};

/// Connectors that declare a relationship
pub const INTERACTION_CONNECTORS: [&str; 2] = ["-->", "-.->"];

/// Actor-interaction parser implementation
pub struct ActorInteractionParser;

impl ActorInteractionParser {
    pub fn new() -> Self {
        Self
    }

    fn register(segment: &InteractionSegment, database: &mut ActorInteractionDatabase) -> Result<()> {
        match &segment.body {
            Some((text, ActorKind::Actor)) => {
                database.add_node(InteractionNode::actor(&segment.id, text))
            }
            Some((text, ActorKind::UseCase)) => {
                database.add_node(InteractionNode::use_case(&segment.id, text))
            }
            None => Ok(()),
        }
    }
}

impl Default for ActorInteractionParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<ActorInteractionDatabase> for ActorInteractionParser {
    fn parse(&self, input: &str, database: &mut ActorInteractionDatabase) -> Result<()> {
        let parse_span = span!(Level::DEBUG, "parse_actor_interaction", input_len = input.len());
        let _enter = parse_span.enter();

        let chumsky = ChumskyInteractionParser::new();
        let mut skipped = 0usize;

        for (index, line) in input.lines().enumerate() {
            if is_skippable_line(line) {
                continue;
            }
            let line_number = index + 1;
            let segments = split_on_connectors(line.trim(), &INTERACTION_CONNECTORS);
            if segments.len() < 2 {
                trace!(line_number, "No connector, skipping line");
                skipped += 1;
                continue;
            }

            let parsed: Vec<_> = segments
                .iter()
                .map(|segment| {
                    let kind = segment.connector.and_then(ConnectionKind::from_connector);
                    chumsky
                        .parse_segment(segment.text)
                        .map_err(|error| {
                            trace!(line_number, segment = segment.text, %error, "Unreadable endpoint");
                        })
                        .ok()
                        .map(|parsed| (kind, parsed))
                })
                .collect();

            for (_, segment) in parsed.iter().flatten() {
                Self::register(segment, database)?;
            }

            for pair in parsed.windows(2) {
                if let [Some((_, source)), Some((kind, target))] = pair {
                    let mut edge =
                        InteractionEdge::new(&source.id, &target.id, kind.unwrap_or_default());
                    if let Some(label) = &target.label {
                        edge = edge.with_label(label);
                    }
                    database.add_edge(edge)?;
                }
            }
        }

        debug!(
            actor_count = database.actors().count(),
            use_case_count = database.use_cases().count(),
            edge_count = database.edge_count(),
            skipped_lines = skipped,
            reclassified = database.reclassification_count(),
            "Parsed actor interaction"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "actor-interaction"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        INTERACTION_CONNECTORS
            .iter()
            .any(|connector| input.contains(connector))
    }
}
