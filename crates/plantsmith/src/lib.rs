//! Plantsmith - Turn flowchart-style notation into PlantUML and keep it renderable
//!
//! Two independent pipelines share plain diagram text:
//!
//! - the notation translators read a small Mermaid-like notation and emit a
//!   PlantUML activity diagram (process flows) or use-case diagram (actor
//!   interactions);
//! - the repair pass fixes common PlantUML defects and the validator reports
//!   what is left.
//!
//! # Quick Start
//!
//! ```rust
//! use plantsmith::{repair_diagram_syntax, translate_process_flow, NotationDocument};
//!
//! let document = NotationDocument::new()
//!     .with_flow_notation("A[Open app] --> B{Logged in?}\nB -->|Yes| C[Show menu]");
//!
//! let draft = translate_process_flow(&document);
//! assert!(draft.contains("if \"Logged in?\" then"));
//!
//! let outcome = repair_diagram_syntax(&draft);
//! assert!(outcome.remaining.is_empty());
//! ```
//!
//! # Advanced Usage
//!
//! ```rust
//! use plantsmith::prelude::*;
//!
//! let parser = ActorInteractionParser::new();
//! let mut database = ActorInteractionDatabase::new();
//! parser.parse("A[User] --> B((Login))", &mut database).unwrap();
//! assert_eq!(database.actors().count(), 1);
//!
//! let text = ActorInteractionGenerator::new().generate(&database).unwrap();
//! assert!(text.contains("A --> B"));
//! ```

pub mod core;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, DecisionPredicate, Detector, Diagram, DiagramError, DiagramRenderer,
        FallbackRenderer, Generator, InterrogativePredicate, NotationDocument, Parser,
    };
    pub use crate::plugins::actor_interaction::{
        ActorInteractionDatabase, ActorInteractionDetector, ActorInteractionGenerator,
        ActorInteractionParser, ActorKind, ConnectionKind,
    };
    pub use crate::plugins::orchestrator::{DiagramKind, DocumentOutput, Orchestrator, PipelineOutput};
    pub use crate::plugins::process_flow::{
        FlowGeneratorConfig, FlowNodeKind, ProcessFlowDatabase, ProcessFlowDetector,
        ProcessFlowGenerator, ProcessFlowParser,
    };
    pub use crate::plugins::repair::{
        RepairFix, RepairOutcome, SyntaxRepairer, SyntaxValidator, ValidationIssue,
    };
}

/// Translate the document's process-flow notation into a PlantUML activity
/// diagram
///
/// A missing, blank or unreadable notation yields the skeleton diagram.
///
/// # Example
/// ```rust
/// use plantsmith::{translate_process_flow, NotationDocument};
///
/// let empty = translate_process_flow(&NotationDocument::new());
/// assert_eq!(empty, "@startuml\ntitle BPMN Diagram\n@enduml");
/// ```
pub fn translate_process_flow(document: &NotationDocument) -> String {
    use crate::plugins::process_flow::ProcessFlowDiagram;

    translate(
        &ProcessFlowDiagram::create_parser(),
        &ProcessFlowDiagram::create_generator(),
        ProcessFlowDiagram::create_database(),
        document.flow_notation.as_deref(),
    )
}

/// Translate the document's actor-interaction notation into a PlantUML
/// use-case diagram
///
/// # Example
/// ```rust
/// use plantsmith::{translate_actor_interaction, NotationDocument};
///
/// let doc = NotationDocument::new().with_interaction_notation("A[User] --> B((Login))");
/// let text = translate_actor_interaction(&doc);
/// assert!(text.contains("actor \"User\" as A"));
/// assert!(text.contains("usecase \"Login\" as B"));
/// ```
pub fn translate_actor_interaction(document: &NotationDocument) -> String {
    use crate::plugins::actor_interaction::ActorInteractionDiagram;

    translate(
        &ActorInteractionDiagram::create_parser(),
        &ActorInteractionDiagram::create_generator(),
        ActorInteractionDiagram::create_database(),
        document.interaction_notation.as_deref(),
    )
}

/// Repair common PlantUML defects
///
/// # Example
/// ```rust
/// use plantsmith::repair_diagram_syntax;
///
/// let (fixed, diagnostics) = repair_diagram_syntax("@startuml\n!thme plain\n@enduml").into_parts();
/// assert_eq!(fixed, "@startuml\n!theme plain\n@enduml");
/// assert_eq!(diagnostics.len(), 1);
/// ```
pub fn repair_diagram_syntax(diagram_text: &str) -> plugins::repair::RepairOutcome {
    plugins::repair::SyntaxRepairer::new().repair(diagram_text)
}

/// Validate PlantUML text without changing it
///
/// Returns whether the text is free of known issues, and one message per
/// issue found.
pub fn validate_diagram_syntax(diagram_text: &str) -> (bool, Vec<String>) {
    plugins::repair::SyntaxValidator::new().check(diagram_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_for_missing_and_blank_notation() {
        let skeleton = "@startuml\ntitle BPMN Diagram\n@enduml";
        assert_eq!(translate_process_flow(&NotationDocument::new()), skeleton);
        assert_eq!(
            translate_process_flow(&NotationDocument::new().with_flow_notation("")),
            skeleton
        );
    }

    #[test]
    fn test_actor_interaction_skeleton() {
        assert_eq!(
            translate_actor_interaction(&NotationDocument::new()),
            "@startuml\ntitle Use Case Diagram\n@enduml"
        );
    }

    #[test]
    fn test_translate_reads_aliased_json_keys() {
        let document = NotationDocument::from_json(
            r#"{"bpmn_mermaid": "A[One] --> B[Two]", "usecase_mermaid": "U[User] --> L((Login))"}"#,
        )
        .unwrap();
        assert!(translate_process_flow(&document).contains("(*) --> \"One\""));
        assert!(translate_actor_interaction(&document).contains("U --> L"));
    }

    #[test]
    fn test_validate_reports_messages() {
        let (valid, errors) = validate_diagram_syntax("@startuml\nif (x?) then\n:a;\n");
        assert!(!valid);
        assert_eq!(errors, vec!["Missing @enduml", "Mismatched if (1) and endif (0) count"]);
    }
}
