//! Corrective rewrites for PlantUML activity text

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, span, trace, Level};

use super::validator::{SyntaxValidator, ValidationIssue};
use super::{closes_conditional, opens_conditional, KEYWORD_COLON, THEME_DIRECTIVE, THEME_TYPO};

static CONDITION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*if\s*\(.*\)").expect("condition header pattern is valid"));

static THEN_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bthen\b").expect("then keyword pattern is valid"));

/// One applied correction
///
/// Line numbers are 1-based and refer to the text as it was when the fix ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "fix", rename_all = "snake_case")]
pub enum RepairFix {
    /// `!thme` replaced with `!theme` everywhere
    ThemeTypo { occurrences: usize },
    /// Leading colon dropped from a control keyword
    KeywordColon {
        line: usize,
        keyword: String,
        original: String,
    },
    /// `then` appended to a condition header
    MissingThen { line: usize, original: String },
    /// `endif` inserted for an unmatched opener
    InsertedEndif { opener_line: usize, inserted_at: usize },
}

impl fmt::Display for RepairFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairFix::ThemeTypo { occurrences } if *occurrences > 1 => write!(
                f,
                "Fixed '{}' to '{}' ({} occurrences)",
                THEME_TYPO, THEME_DIRECTIVE, occurrences
            ),
            RepairFix::ThemeTypo { .. } => {
                write!(f, "Fixed '{}' to '{}'", THEME_TYPO, THEME_DIRECTIVE)
            }
            RepairFix::KeywordColon {
                line,
                keyword,
                original,
            } => write!(
                f,
                "Removed colon before '{}' on line {}: {}",
                keyword, line, original
            ),
            RepairFix::MissingThen { line, original } => {
                write!(f, "Added 'then' to condition on line {}: {}", line, original)
            }
            RepairFix::InsertedEndif {
                opener_line,
                inserted_at,
            } => write!(
                f,
                "Inserted 'endif' at line {} to close the 'if' on line {}",
                inserted_at, opener_line
            ),
        }
    }
}

/// Result of a repair pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairOutcome {
    /// The corrected text
    pub fixed_text: String,
    /// Corrections in the order they were applied; empty when nothing changed
    pub fixes: Vec<RepairFix>,
    /// Issues the validator still reports on `fixed_text`
    pub remaining: Vec<ValidationIssue>,
}

impl RepairOutcome {
    /// True when the pass changed nothing
    pub fn is_unchanged(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Human-readable fix descriptions
    pub fn diagnostics(&self) -> Vec<String> {
        self.fixes.iter().map(ToString::to_string).collect()
    }

    /// Human-readable remaining issues
    pub fn remaining_messages(&self) -> Vec<String> {
        self.remaining.iter().map(ToString::to_string).collect()
    }

    /// Split into the corrected text and the fix descriptions
    pub fn into_parts(self) -> (String, Vec<String>) {
        let diagnostics = self.diagnostics();
        (self.fixed_text, diagnostics)
    }
}

/// Best-effort repair pass
///
/// Fixes run in a fixed order and each one only when its trigger is present:
/// theme typo, keyword colons, missing `then`, unbalanced blocks.
#[derive(Debug, Default, Clone)]
pub struct SyntaxRepairer {
    validator: SyntaxValidator,
}

impl SyntaxRepairer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repair `text` and validate the result
    pub fn repair(&self, text: &str) -> RepairOutcome {
        let repair_span = span!(Level::DEBUG, "repair", input_len = text.len());
        let _enter = repair_span.enter();

        let mut fixes = Vec::new();
        let fixed_text = if text.is_empty() {
            String::new()
        } else {
            let patched = fix_theme_typo(text, &mut fixes);
            let mut lines: Vec<String> = patched.split('\n').map(str::to_string).collect();
            strip_keyword_colons(&mut lines, &mut fixes);
            append_missing_then(&mut lines, &mut fixes);
            balance_conditionals(&mut lines, &mut fixes);
            lines.join("\n")
        };

        let remaining = self.validator.validate(&fixed_text);
        if fixes.is_empty() {
            debug!(remaining = remaining.len(), "No repairs needed");
        } else {
            info!(fixes = fixes.len(), remaining = remaining.len(), "Repaired diagram text");
        }

        RepairOutcome {
            fixed_text,
            fixes,
            remaining,
        }
    }
}

fn fix_theme_typo(text: &str, fixes: &mut Vec<RepairFix>) -> String {
    let occurrences = text.matches(THEME_TYPO).count();
    if occurrences == 0 {
        return text.to_string();
    }
    trace!(occurrences, "Fixing theme typo");
    fixes.push(RepairFix::ThemeTypo { occurrences });
    text.replace(THEME_TYPO, THEME_DIRECTIVE)
}

fn strip_keyword_colons(lines: &mut [String], fixes: &mut Vec<RepairFix>) {
    for (index, line) in lines.iter_mut().enumerate() {
        let Some(captures) = KEYWORD_COLON.captures(line) else {
            continue;
        };
        let keyword = captures[2].to_string();
        let rewritten = KEYWORD_COLON.replace(line, "${1}${2}").into_owned();
        trace!(line = index + 1, %keyword, "Removing keyword colon");
        fixes.push(RepairFix::KeywordColon {
            line: index + 1,
            keyword,
            original: line.trim().to_string(),
        });
        *line = rewritten;
    }
}

fn append_missing_then(lines: &mut [String], fixes: &mut Vec<RepairFix>) {
    for (index, line) in lines.iter_mut().enumerate() {
        if !CONDITION_HEADER.is_match(line) || THEN_KEYWORD.is_match(line) {
            continue;
        }
        trace!(line = index + 1, "Appending then");
        fixes.push(RepairFix::MissingThen {
            line: index + 1,
            original: line.trim().to_string(),
        });
        let mut rewritten = line.trim_end().to_string();
        rewritten.push_str(" then");
        *line = rewritten;
    }
}

fn balance_conditionals(lines: &mut Vec<String>, fixes: &mut Vec<RepairFix>) {
    let mut open: Vec<usize> = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if opens_conditional(line) {
            open.push(index);
        } else if closes_conditional(line) {
            // A closer on an empty stack is left alone
            open.pop();
        }
    }

    if open.is_empty() {
        return;
    }
    debug!(unclosed = open.len(), "Closing conditional blocks");

    // Highest opener first, so earlier positions stay valid
    let mut inserted = Vec::with_capacity(open.len());
    for &opener in open.iter().rev() {
        let indent: String = lines[opener]
            .chars()
            .take_while(|c| c.is_whitespace())
            .collect();
        let position = lines
            .iter()
            .enumerate()
            .skip(opener + 1)
            .find(|(_, line)| !line.trim().is_empty())
            .map(|(index, _)| index)
            .unwrap_or_else(|| end_of_text(lines));
        lines.insert(position, format!("{indent}endif"));
        inserted.push((opener, position));
    }

    // Report in document order, with final line numbers
    inserted.reverse();
    for (shift, (opener, position)) in inserted.into_iter().enumerate() {
        fixes.push(RepairFix::InsertedEndif {
            opener_line: opener + shift + 1,
            inserted_at: position + shift + 1,
        });
    }
}

/// Insertion point after the last line, keeping a trailing newline in place
fn end_of_text(lines: &[String]) -> usize {
    match lines.last() {
        Some(last) if last.is_empty() && lines.len() > 1 => lines.len() - 1,
        _ => lines.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repair(text: &str) -> RepairOutcome {
        SyntaxRepairer::new().repair(text)
    }

    #[test]
    fn test_theme_typo_single_diagnostic() {
        let outcome = repair("@startuml\n!thme plain\n@enduml");
        assert_eq!(outcome.fixed_text, "@startuml\n!theme plain\n@enduml");
        assert_eq!(outcome.fixes, vec![RepairFix::ThemeTypo { occurrences: 1 }]);
        assert_eq!(outcome.diagnostics(), vec!["Fixed '!thme' to '!theme'"]);
    }

    #[test]
    fn test_theme_typo_counts_occurrences() {
        let outcome = repair("!thme a\n!thme b");
        assert_eq!(outcome.fixes.len(), 1);
        assert!(outcome.diagnostics()[0].contains("2 occurrences"));
    }

    #[test]
    fn test_keyword_colon_keeps_indentation() {
        let outcome = repair("@startuml\n  :else (no)\n:stop\n@enduml");
        assert_eq!(outcome.fixed_text, "@startuml\n  else (no)\nstop\n@enduml");
        assert_eq!(outcome.fixes.len(), 2);
        assert_eq!(
            outcome.fixes[0],
            RepairFix::KeywordColon {
                line: 2,
                keyword: "else".to_string(),
                original: ":else (no)".to_string(),
            }
        );
    }

    #[test]
    fn test_activity_labels_are_untouched() {
        let text = "@startuml\n:ifconfig check;\n:Start engine;\n@enduml";
        let outcome = repair(text);
        assert!(outcome.is_unchanged());
        assert_eq!(outcome.fixed_text, text);
    }

    #[test]
    fn test_missing_then() {
        let outcome = repair("@startuml\nif (ready)  \n:go;\nendif\n@enduml");
        assert_eq!(outcome.fixed_text, "@startuml\nif (ready) then\n:go;\nendif\n@enduml");
        assert!(matches!(outcome.fixes[0], RepairFix::MissingThen { line: 2, .. }));
    }

    #[test]
    fn test_then_already_present() {
        let outcome = repair("@startuml\nif (a) then (yes)\nendif\n@enduml");
        assert!(outcome.is_unchanged());
    }

    #[test]
    fn test_balance_inserts_before_next_line() {
        let outcome = repair("@startuml\nif (x?) then\n:a;\n");
        assert_eq!(outcome.fixed_text, "@startuml\nif (x?) then\nendif\n:a;\n");
        assert_eq!(
            outcome.fixes,
            vec![RepairFix::InsertedEndif {
                opener_line: 2,
                inserted_at: 3
            }]
        );
    }

    #[test]
    fn test_balance_appends_at_end() {
        let outcome = repair("@startuml\n:a;\n  if (x) then\n\n");
        assert_eq!(outcome.fixed_text, "@startuml\n:a;\n  if (x) then\n\n  endif\n");
    }

    #[test]
    fn test_balance_several_openers() {
        let outcome = repair("if (a) then\nif (b) then\n:x;");
        assert_eq!(outcome.fixed_text, "if (a) then\nendif\nif (b) then\nendif\n:x;");
        assert_eq!(
            outcome.fixes,
            vec![
                RepairFix::InsertedEndif {
                    opener_line: 1,
                    inserted_at: 2
                },
                RepairFix::InsertedEndif {
                    opener_line: 3,
                    inserted_at: 4
                },
            ]
        );
    }

    #[test]
    fn test_stray_closer_is_ignored() {
        let outcome = repair("@startuml\nendif\n@enduml");
        assert!(outcome.is_unchanged());
        assert!(!outcome.remaining.is_empty());
    }

    #[test]
    fn test_colon_fix_feeds_balance() {
        let outcome = repair("@startuml\n:if (x)\n:a;\n@enduml");
        assert_eq!(
            outcome.fixed_text,
            "@startuml\nif (x) then\nendif\n:a;\n@enduml"
        );
        assert_eq!(outcome.fixes.len(), 3);
        assert!(outcome.remaining.is_empty());
    }

    #[test]
    fn test_second_pass_is_noop() {
        let text = "@startuml\n!thme plain\n:start\n:if (ok?)\n  :a;\n:else\n  :b;\nif (c)\n:stop\n";
        let first = repair(text);
        let second = repair(&first.fixed_text);
        assert!(!first.fixes.is_empty());
        assert!(second.fixes.is_empty());
        assert_eq!(second.fixed_text, first.fixed_text);
    }

    #[test]
    fn test_empty_text() {
        let outcome = repair("");
        assert!(outcome.is_unchanged());
        assert_eq!(outcome.remaining, vec![ValidationIssue::EmptyText]);
    }

    #[test]
    fn test_into_parts() {
        let (text, diagnostics) = repair("!thme x").into_parts();
        assert_eq!(text, "!theme x");
        assert_eq!(diagnostics.len(), 1);
    }
}
