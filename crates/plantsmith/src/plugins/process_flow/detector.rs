//! Process-flow detector
//!
//! Identifies action/decision notation from input text.

use super::parser::FLOW_CONNECTORS;
use crate::core::Detector;

/// Detector for process-flow notation
pub struct ProcessFlowDetector;

impl ProcessFlowDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProcessFlowDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ProcessFlowDetector {
    fn detect(&self, input: &str) -> bool {
        self.confidence(input) >= 0.5
    }

    fn confidence(&self, input: &str) -> f64 {
        let has_connector = FLOW_CONNECTORS
            .iter()
            .any(|connector| input.contains(connector));
        if !has_connector {
            return 0.0;
        }

        // Use-case ovals belong to the actor-interaction notation
        if input.contains("((") {
            return 0.2;
        }

        let has_decision = input.contains('{') && input.contains('}');
        let has_action = input.contains('[') && input.contains(']');

        if has_decision {
            0.9
        } else if has_action {
            0.7
        } else {
            0.5
        }
    }

    fn diagram_type(&self) -> &'static str {
        "process-flow"
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["-->", "-.->", "==>", "ID[text]", "ID{text}"]
    }
}
