//! Property tests: translation is deterministic and repair converges in one pass

use plantsmith::plugins::repair::SyntaxRepairer;
use plantsmith::{
    repair_diagram_syntax, translate_actor_interaction, translate_process_flow, NotationDocument,
};
use proptest::prelude::*;

const DIAGRAM_LINES: &[&str] = &[
    "@startuml",
    "@enduml",
    "",
    "   ",
    "!thme plain",
    "title end of day",
    ":start",
    ":stop",
    ":step;",
    ":if (a)",
    "  :else (no)",
    ":endif",
    "if (b)",
    "if(c)",
    "if (d) then",
    "  if (e) then (yes)",
    "if (f) thenx",
    "endif",
    "  endif",
];

const NOTATION_LINES: &[&str] = &[
    "flowchart TD",
    "%% comment",
    "",
    "A[Start] --> B{Paid?}",
    "B -->|Yes| C[Ship]",
    "B -.->|No| D[Cancel]",
    "C ==> E[Done]",
    "D --> A",
    "U[User] --> L((Login))",
    "L -.->|include| P((Check password))",
    "A{Start over?} --> Q",
    "broken line",
    "--> X[Orphan]",
];

fn text_from(vocabulary: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vocabulary), 0..24).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn test_repair_is_idempotent(text in text_from(DIAGRAM_LINES)) {
        let first = repair_diagram_syntax(&text);
        let second = repair_diagram_syntax(&first.fixed_text);
        prop_assert!(second.fixes.is_empty(), "second pass fixed {:?}", second.fixes);
        prop_assert_eq!(second.fixed_text, first.fixed_text);
    }

    #[test]
    fn test_repair_is_idempotent_on_arbitrary_text(text in ".{0,200}") {
        let repairer = SyntaxRepairer::new();
        let first = repairer.repair(&text);
        let second = repairer.repair(&first.fixed_text);
        prop_assert!(second.fixes.is_empty());
    }

    #[test]
    fn test_repair_is_deterministic(text in text_from(DIAGRAM_LINES)) {
        prop_assert_eq!(repair_diagram_syntax(&text), repair_diagram_syntax(&text));
    }

    #[test]
    fn test_translation_is_deterministic(notation in text_from(NOTATION_LINES)) {
        let document = NotationDocument::new()
            .with_flow_notation(notation.clone())
            .with_interaction_notation(notation);
        prop_assert_eq!(translate_process_flow(&document), translate_process_flow(&document));
        prop_assert_eq!(
            translate_actor_interaction(&document),
            translate_actor_interaction(&document)
        );
    }

    #[test]
    fn test_translation_is_always_a_complete_diagram(notation in "\\PC{0,120}") {
        let document = NotationDocument::new()
            .with_flow_notation(notation.clone())
            .with_interaction_notation(notation);
        for output in [translate_process_flow(&document), translate_actor_interaction(&document)] {
            prop_assert!(output.starts_with("@startuml\n"));
            prop_assert!(output.ends_with("\n@enduml"));
        }
    }
}
