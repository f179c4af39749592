//! Process-flow parser implementation
//!
//! Cuts each statement line at its connectors and hands every piece to the
//! chumsky segment grammar. Consecutive pieces become transitions, so a
//! chained line `A --> B --> C` yields two edges.

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::chumsky_parser::{ChumskyFlowParser, FlowSegment};
use super::database::{FlowEdge, FlowNode, ProcessFlowDatabase};
use crate::core::notation::{is_skippable_line, split_on_connectors};
use crate::core::{Database, Parser};

/// Connectors that declare a transition
pub const FLOW_CONNECTORS: [&str; 3] = ["-->", "-.->", "==>"];

/// Process-flow parser implementation
pub struct ProcessFlowParser;

impl ProcessFlowParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_statement(
        &self,
        chumsky: &ChumskyFlowParser,
        line_number: usize,
        line: &str,
        database: &mut ProcessFlowDatabase,
    ) -> Result<bool> {
        let segments = split_on_connectors(line, &FLOW_CONNECTORS);
        if segments.len() < 2 {
            trace!(line_number, "No connector, skipping line");
            return Ok(false);
        }

        let parsed: Vec<Option<FlowSegment>> = segments
            .iter()
            .map(|segment| match chumsky.parse_segment(segment.text) {
                Ok(parsed) => Some(parsed),
                Err(error) => {
                    trace!(line_number, segment = segment.text, %error, "Unreadable endpoint");
                    None
                }
            })
            .collect();

        for segment in parsed.iter().flatten() {
            if let Some((text, kind)) = &segment.node.body {
                database.add_node(FlowNode::new(&segment.node.id, text, *kind))?;
            }
        }

        let mut added = false;
        for pair in parsed.windows(2) {
            if let [Some(source), Some(target)] = pair {
                let mut edge = FlowEdge::new(&source.node.id, &target.node.id);
                if let Some(label) = &target.label {
                    edge = edge.with_label(label);
                }
                database.add_edge(edge)?;
                added = true;
            }
        }
        Ok(added)
    }
}

impl Default for ProcessFlowParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<ProcessFlowDatabase> for ProcessFlowParser {
    fn parse(&self, input: &str, database: &mut ProcessFlowDatabase) -> Result<()> {
        let parse_span = span!(Level::DEBUG, "parse_process_flow", input_len = input.len());
        let _enter = parse_span.enter();

        let chumsky = ChumskyFlowParser::new();
        let mut skipped = 0usize;

        for (index, line) in input.lines().enumerate() {
            if is_skippable_line(line) {
                continue;
            }
            if !self.parse_statement(&chumsky, index + 1, line.trim(), database)? {
                skipped += 1;
            }
        }

        debug!(
            node_count = database.node_count(),
            edge_count = database.edge_count(),
            skipped_lines = skipped,
            reclassified = database.reclassification_count(),
            "Parsed process flow"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "process-flow"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        FLOW_CONNECTORS
            .iter()
            .any(|connector| input.contains(connector))
    }
}
