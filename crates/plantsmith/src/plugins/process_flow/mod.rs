//! Process-flow diagram plugin
//!
//! Translates action/decision notation (`A[text] --> B{text?}`) into a
//! PlantUML activity diagram.

use crate::core::{Detector, Diagram};
use std::sync::Arc;

mod chumsky_parser;
mod database;
mod detector;
mod generator;
mod parser;

pub use chumsky_parser::{ChumskyFlowParser, FlowNodeRef, FlowSegment};
pub use database::*;
pub use detector::*;
pub use generator::*;
pub use parser::*;

/// Process-flow diagram implementation
pub struct ProcessFlowDiagram;

impl Diagram for ProcessFlowDiagram {
    type Database = ProcessFlowDatabase;
    type Parser = ProcessFlowParser;
    type Generator = ProcessFlowGenerator;

    fn detector() -> Arc<dyn Detector> {
        Arc::new(ProcessFlowDetector::new())
    }

    fn create_parser() -> Self::Parser {
        ProcessFlowParser::new()
    }

    fn create_database() -> Self::Database {
        ProcessFlowDatabase::new()
    }

    fn create_generator() -> Self::Generator {
        ProcessFlowGenerator::new()
    }

    fn name() -> &'static str {
        "process-flow"
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::core::{translate, Database, Parser};

    #[test]
    fn test_full_pipeline() {
        let detector = ProcessFlowDiagram::detector();
        let parser = ProcessFlowDiagram::create_parser();
        let mut database = ProcessFlowDiagram::create_database();
        let generator = ProcessFlowDiagram::create_generator();

        let input = "flowchart TD\n    A[Start] --> B{Valid?}\n    B -->|Yes| C[Save]";
        assert!(detector.detect(input));
        assert_eq!(detector.diagram_type(), ProcessFlowDiagram::name());

        parser.parse(input, &mut database).unwrap();
        assert_eq!(database.node_count(), 3);
        assert_eq!(database.edge_count(), 2);

        let output = translate(&parser, &generator, ProcessFlowDatabase::new(), Some(input));
        assert!(output.contains("(*) --> \"Start\""));
        assert!(output.contains("if \"Valid?\" then\n  -->[\"Yes\"] \"Save\""));
        assert!(output.ends_with("--> (*)\n@enduml"));
    }

    #[test]
    fn test_russian_interrogatives() {
        let input = "A[Покупатель выбрал товар] --> B{Есть ли товар}\nB -->|Да| C[Оформить заказ]";
        let output = translate(
            &ProcessFlowParser::new(),
            &ProcessFlowGenerator::new(),
            ProcessFlowDatabase::new(),
            Some(input),
        );
        assert!(output.contains("if \"Есть ли товар\" then\n  -->[\"Да\"] \"Оформить заказ\""));
        assert!(output.contains("\n--> \"Есть ли товар\"\n"));
    }

    #[test]
    fn test_skeleton_for_unusable_input() {
        let parser = ProcessFlowParser::new();
        let generator = ProcessFlowGenerator::new();
        for input in [None, Some(""), Some("   \n"), Some("flowchart TD\nA --> B")] {
            let output = translate(&parser, &generator, ProcessFlowDatabase::new(), input);
            assert_eq!(output, "@startuml\ntitle BPMN Diagram\n@enduml");
        }
    }
}
