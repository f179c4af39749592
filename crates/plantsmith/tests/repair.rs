//! Repair and validation over hand-written activity diagrams

use plantsmith::plugins::repair::{RepairFix, SyntaxRepairer, SyntaxValidator, ValidationIssue};

const BROKEN: &str = "@startuml
!thme plain
title Checkout

:start
:Add to cart;
:if (Payment ok?) then (yes)
  :Ship;
:else (no)
  :Cancel;
:endif
:stop
@enduml";

#[test]
fn test_broken_sample_is_fully_repaired() {
    let before = SyntaxValidator::new().validate(BROKEN);
    assert!(before.contains(&ValidationIssue::ThemeTypo));
    assert_eq!(
        before
            .iter()
            .filter(|issue| matches!(issue, ValidationIssue::ColonBeforeKeyword { .. }))
            .count(),
        5
    );

    let outcome = SyntaxRepairer::new().repair(BROKEN);
    assert_eq!(
        outcome.fixed_text,
        "@startuml
!theme plain
title Checkout

start
:Add to cart;
if (Payment ok?) then (yes)
  :Ship;
else (no)
  :Cancel;
endif
stop
@enduml"
    );
    assert_eq!(outcome.fixes.len(), 6);
    assert_eq!(outcome.fixes[0], RepairFix::ThemeTypo { occurrences: 1 });
    assert!(outcome.remaining.is_empty());
}

#[test]
fn test_fix_order_is_fixed() {
    let outcome = SyntaxRepairer::new().repair("@startuml\n:if (a)\n!thme x\n@enduml");
    let kinds: Vec<_> = outcome
        .fixes
        .iter()
        .map(|fix| match fix {
            RepairFix::ThemeTypo { .. } => "typo",
            RepairFix::KeywordColon { .. } => "colon",
            RepairFix::MissingThen { .. } => "then",
            RepairFix::InsertedEndif { .. } => "endif",
        })
        .collect();
    assert_eq!(kinds, vec!["typo", "colon", "then", "endif"]);
}

#[test]
fn test_nesting_order_errors_are_not_corrected() {
    // The stack ignores the stray closer, so only the opener gets an endif
    let text = "@startuml\nendif\nif (a) then\n:x;\n@enduml";
    let outcome = SyntaxRepairer::new().repair(text);
    assert_eq!(outcome.fixes.len(), 1);
    assert!(outcome.fixed_text.starts_with("@startuml\nendif\nif (a) then\nendif\n"));
    assert_eq!(
        outcome.remaining,
        vec![ValidationIssue::UnbalancedConditionals {
            opened: 1,
            closed: 2
        }]
    );
}

#[test]
fn test_repair_reports_remaining_issues_separately() {
    let outcome = SyntaxRepairer::new().repair(":a;\nactor \"X\" as end");
    assert!(outcome.fixes.is_empty());
    assert_eq!(outcome.remaining_messages().len(), 3);
    assert!(outcome.remaining_messages()[2].contains("'end'"));
}

#[test]
fn test_crlf_lines_are_preserved_when_untouched() {
    let text = "@startuml\r\n:step;\r\n@enduml\r\n";
    let outcome = SyntaxRepairer::new().repair(text);
    assert!(outcome.is_unchanged());
    assert_eq!(outcome.fixed_text, text);
}

#[test]
fn test_serialized_fix_shape() {
    let outcome = SyntaxRepairer::new().repair("!thme x");
    let json = serde_json::to_value(&outcome.fixes).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "fix": "theme_typo", "occurrences": 1 }])
    );
}
