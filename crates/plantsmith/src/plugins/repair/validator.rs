//! Read-only structural checks for PlantUML text

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, span, Level};

use super::{closes_conditional, opens_conditional, KEYWORD_COLON, THEME_TYPO};

/// Identifiers that break rendering when used as node names
pub const RESERVED_IDENTIFIERS: [&str; 7] = [
    "end",
    "click",
    "class",
    "style",
    "subgraph",
    "graph",
    "flowchart",
];

static RESERVED_USE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = RESERVED_IDENTIFIERS.join("|");
    Regex::new(&format!(
        r"\sas\s+({alternatives})\b|\s({alternatives})\s"
    ))
    .expect("reserved identifier pattern is valid")
});

/// A structural problem found by the validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ValidationIssue {
    EmptyText,
    MissingStartMarker,
    MissingEndMarker,
    /// Opener and closer counts differ
    UnbalancedConditionals { opened: usize, closed: usize },
    ReservedIdentifier { identifier: String, line: usize },
    ColonBeforeKeyword { keyword: String, line: usize },
    ThemeTypo,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyText => write!(f, "Empty diagram text"),
            ValidationIssue::MissingStartMarker => write!(f, "Missing @startuml"),
            ValidationIssue::MissingEndMarker => write!(f, "Missing @enduml"),
            ValidationIssue::UnbalancedConditionals { opened, closed } => write!(
                f,
                "Mismatched if ({}) and endif ({}) count",
                opened, closed
            ),
            ValidationIssue::ReservedIdentifier { identifier, line } => write!(
                f,
                "Reserved identifier '{}' used on line {}",
                identifier, line
            ),
            ValidationIssue::ColonBeforeKeyword { keyword, line } => {
                write!(f, "Colon before '{}' on line {}", keyword, line)
            }
            ValidationIssue::ThemeTypo => write!(f, "Typo '{}' instead of '!theme'", THEME_TYPO),
        }
    }
}

/// Read-only validation pass
#[derive(Debug, Default, Clone)]
pub struct SyntaxValidator;

impl SyntaxValidator {
    pub fn new() -> Self {
        Self
    }

    /// Collect every issue in `text`, in check order
    pub fn validate(&self, text: &str) -> Vec<ValidationIssue> {
        let validate_span = span!(Level::TRACE, "validate", input_len = text.len());
        let _enter = validate_span.enter();

        if text.trim().is_empty() {
            return vec![ValidationIssue::EmptyText];
        }

        let mut issues = Vec::new();
        let lines: Vec<&str> = text.split('\n').collect();

        if !lines.iter().any(|line| line.contains("@startuml")) {
            issues.push(ValidationIssue::MissingStartMarker);
        }
        if !lines.iter().any(|line| line.contains("@enduml")) {
            issues.push(ValidationIssue::MissingEndMarker);
        }

        let opened = lines.iter().filter(|line| opens_conditional(line)).count();
        let closed = lines.iter().filter(|line| closes_conditional(line)).count();
        if opened != closed {
            issues.push(ValidationIssue::UnbalancedConditionals { opened, closed });
        }

        for (index, line) in lines.iter().enumerate() {
            if let Some(identifier) = reserved_identifier(line) {
                issues.push(ValidationIssue::ReservedIdentifier {
                    identifier: identifier.to_string(),
                    line: index + 1,
                });
            }
        }

        for (index, line) in lines.iter().enumerate() {
            if let Some(captures) = KEYWORD_COLON.captures(line) {
                issues.push(ValidationIssue::ColonBeforeKeyword {
                    keyword: captures[2].to_string(),
                    line: index + 1,
                });
            }
        }

        if text.contains(THEME_TYPO) {
            issues.push(ValidationIssue::ThemeTypo);
        }

        debug!(issues = issues.len(), "Validated diagram text");
        issues
    }

    /// `(is_valid, messages)` view of [`validate`](Self::validate)
    pub fn check(&self, text: &str) -> (bool, Vec<String>) {
        let issues = self.validate(text);
        (
            issues.is_empty(),
            issues.iter().map(ToString::to_string).collect(),
        )
    }
}

fn reserved_identifier(line: &str) -> Option<&str> {
    let captures = RESERVED_USE.captures(line)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|matched| matched.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(text: &str) -> Vec<ValidationIssue> {
        SyntaxValidator::new().validate(text)
    }

    #[test]
    fn test_clean_diagram() {
        let text = "@startuml\nstart\nif (ok?) then (yes)\n  :go;\nendif\nstop\n@enduml";
        assert!(validate(text).is_empty());
        assert_eq!(SyntaxValidator::new().check(text), (true, vec![]));
    }

    #[test]
    fn test_empty_text_is_single_issue() {
        assert_eq!(validate(""), vec![ValidationIssue::EmptyText]);
        assert_eq!(validate("  \n"), vec![ValidationIssue::EmptyText]);
    }

    #[test]
    fn test_unclosed_block_without_end_marker() {
        let issues = validate("@startuml\nif (x?) then\n:a;\n");
        assert_eq!(
            issues,
            vec![
                ValidationIssue::MissingEndMarker,
                ValidationIssue::UnbalancedConditionals {
                    opened: 1,
                    closed: 0
                },
            ]
        );
    }

    #[test]
    fn test_reserved_identifiers() {
        let issues = validate("@startuml\nactor \"Admin\" as class\nA --> end --> B\nactor \"X\" as endpoint\n@enduml");
        assert_eq!(
            issues,
            vec![
                ValidationIssue::ReservedIdentifier {
                    identifier: "class".to_string(),
                    line: 2
                },
                ValidationIssue::ReservedIdentifier {
                    identifier: "end".to_string(),
                    line: 3
                },
            ]
        );
    }

    #[test]
    fn test_colon_and_typo() {
        let issues = validate("@startuml\n!thme plain\n:start\n@enduml");
        assert_eq!(
            issues,
            vec![
                ValidationIssue::ColonBeforeKeyword {
                    keyword: "start".to_string(),
                    line: 3
                },
                ValidationIssue::ThemeTypo,
            ]
        );
    }

    #[test]
    fn test_messages() {
        let (valid, messages) = SyntaxValidator::new().check("if (a)");
        assert!(!valid);
        assert_eq!(
            messages,
            vec![
                "Missing @startuml",
                "Missing @enduml",
                "Mismatched if (1) and endif (0) count",
            ]
        );
    }
}
