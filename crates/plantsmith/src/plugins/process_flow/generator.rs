//! Process-flow PlantUML generator
//!
//! Emits an activity diagram in a single forward pass over the edges. A
//! transition whose source reads as a decision opens an `if` block on the
//! spot; by default nothing closes it (see [`FlowGeneratorConfig`]).

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::database::{FlowNode, FlowNodeKind, ProcessFlowDatabase};
use crate::core::{Database, DecisionPredicate, Generator, InterrogativePredicate, SharedPredicate};

const HEADER: &str = "@startuml
!theme plain
title BPMN Process Diagram
skinparam participant {
  BackgroundColor LightGreen
  BorderColor DarkGreen
}
skinparam activity {
  BackgroundColor LightBlue
  BorderColor DarkBlue
}
skinparam decision {
  BackgroundColor LightYellow
  BorderColor Orange
}";

const SKELETON: &str = "@startuml\ntitle BPMN Diagram\n@enduml";

/// Generator configuration
#[derive(Debug, Clone, Default)]
pub struct FlowGeneratorConfig {
    /// Close every conditional block with `endif` right after its transition
    pub close_conditionals: bool,
    /// Treat `{...}` nodes as conditionals even when the predicate disagrees
    pub shape_decisions: bool,
}

impl FlowGeneratorConfig {
    pub fn with_close_conditionals(mut self, close: bool) -> Self {
        self.close_conditionals = close;
        self
    }

    pub fn with_shape_decisions(mut self, enabled: bool) -> Self {
        self.shape_decisions = enabled;
        self
    }
}

/// Process-flow generator implementation
pub struct ProcessFlowGenerator {
    config: FlowGeneratorConfig,
    predicate: SharedPredicate,
}

impl ProcessFlowGenerator {
    /// Create a generator with the default predicate and configuration
    pub fn new() -> Self {
        Self {
            config: FlowGeneratorConfig::default(),
            predicate: Arc::new(InterrogativePredicate::new()),
        }
    }

    pub fn with_config(mut self, config: FlowGeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the decision predicate
    pub fn with_predicate<P>(mut self, predicate: P) -> Self
    where
        P: DecisionPredicate + 'static,
    {
        self.predicate = Arc::new(predicate);
        self
    }

    /// Reuse a predicate shared with other generators
    pub fn with_shared_predicate(mut self, predicate: SharedPredicate) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn config(&self) -> &FlowGeneratorConfig {
        &self.config
    }

    fn opens_conditional(&self, source: &FlowNode) -> bool {
        (self.config.shape_decisions && source.kind == FlowNodeKind::Decision)
            || self.predicate.is_decision(&source.text)
    }

    fn push_transition(output: &mut String, indent: &str, label: Option<&str>, target: &str) {
        match label {
            Some(label) => {
                let _ = writeln!(output, "{indent}-->[\"{label}\"] \"{target}\"");
            }
            None => {
                let _ = writeln!(output, "{indent}--> \"{target}\"");
            }
        }
    }
}

impl Default for ProcessFlowGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<ProcessFlowDatabase> for ProcessFlowGenerator {
    fn generate(&self, database: &ProcessFlowDatabase) -> Result<String> {
        let generate_span = span!(
            Level::DEBUG,
            "generate_process_flow",
            node_count = database.node_count(),
            edge_count = database.edge_count()
        );
        let _enter = generate_span.enter();

        let mut output = String::from(HEADER);
        output.push('\n');

        if let Some(start) = database.first_node() {
            let _ = writeln!(output, "(*) --> \"{}\"", start.text);
        }

        let mut conditionals = 0usize;
        let mut emitted = 0usize;
        for (edge, source, target) in database.resolved_edges() {
            let label = edge.label.as_deref();
            if self.opens_conditional(source) {
                trace!(source = %source.id, target = %target.id, "Conditional transition");
                let _ = writeln!(output, "if \"{}\" then", source.text);
                Self::push_transition(&mut output, "  ", label, &target.text);
                if self.config.close_conditionals {
                    output.push_str("endif\n");
                }
                conditionals += 1;
            } else {
                trace!(source = %source.id, target = %target.id, "Plain transition");
                Self::push_transition(&mut output, "", label, &target.text);
            }
            emitted += 1;
        }

        output.push_str("--> (*)\n@enduml");

        debug!(
            transitions = emitted,
            skipped = database.edge_count() - emitted,
            conditionals,
            "Generated process flow"
        );
        Ok(output)
    }

    fn skeleton(&self) -> String {
        SKELETON.to_string()
    }

    fn name(&self) -> &'static str {
        "process-flow"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
