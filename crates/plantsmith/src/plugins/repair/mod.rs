//! PlantUML syntax repair and validation
//!
//! Both passes work on raw diagram text, not on a parsed model:
//!
//! - [`SyntaxRepairer`] applies line-anchored regex rewrites and then balances
//!   `if`/`endif` blocks with a single stack of opener positions.
//! - [`SyntaxValidator`] is read-only and reports structural issues as data.
//!
//! # Limitations
//!
//! The repair pass is a heuristic. It counts openers and closers and never
//! checks which `endif` belongs to which `if`, so nesting-order errors (an
//! `endif` that closes the wrong block, an `else` outside any block) survive
//! repair unchanged. An unmatched opener is closed right before the next
//! non-blank line, which restores the counts but not necessarily the intended
//! structure. Run the validator afterwards to see what is left.

use std::sync::LazyLock;

use regex::Regex;

mod fixer;
mod validator;

pub use fixer::*;
pub use validator::*;

/// Misspelled theme directive and its correction
pub(crate) const THEME_TYPO: &str = "!thme";
pub(crate) const THEME_DIRECTIVE: &str = "!theme";

/// Control keyword written as an activity label (`:if`, `:endif`, ...)
pub(crate) static KEYWORD_COLON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*):(if|else|endif|start|stop)\b").expect("keyword colon pattern is valid")
});

/// Start of a line that opens a conditional block
pub(crate) fn opens_conditional(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("if ") || trimmed.starts_with("if(")
}

/// Start of a line that closes a conditional block
pub(crate) fn closes_conditional(line: &str) -> bool {
    line.trim().starts_with("endif")
}
