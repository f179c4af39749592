//! Actor-interaction detector

use super::parser::INTERACTION_CONNECTORS;
use crate::core::Detector;

/// Detector for actor/use-case notation
pub struct ActorInteractionDetector;

impl ActorInteractionDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ActorInteractionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ActorInteractionDetector {
    fn detect(&self, input: &str) -> bool {
        self.confidence(input) >= 0.5
    }

    fn confidence(&self, input: &str) -> f64 {
        let has_connector = INTERACTION_CONNECTORS
            .iter()
            .any(|connector| input.contains(connector));
        if !has_connector {
            return 0.0;
        }

        if input.contains("((") && input.contains("))") {
            return 0.9;
        }

        // Dashed links between actors lean towards use-case notation, but
        // decisions never appear in it
        if input.contains("-.->") && !input.contains('{') {
            return 0.4;
        }

        0.0
    }

    fn diagram_type(&self) -> &'static str {
        "actor-interaction"
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["-->", "-.->", "ID[text]", "ID((text))"]
    }
}
