//! Shared chumsky parser utilities for notation parsing
//!
//! Node references in both notations share the same pieces: a word-character
//! identifier, a delimited body holding free text, and a `|label|` that may
//! precede a node reference right after a connector.

use chumsky::prelude::*;

/// Parse inline whitespace only (spaces and tabs, no newlines).
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse a node identifier: one or more word characters (Unicode aware).
pub fn identifier<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    any()
        .filter(|c: &char| c.is_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .collect::<String>()
        .labelled("identifier")
}

/// Parse free text up to (not including) `close` on the same line.
///
/// Surrounding whitespace is trimmed from the result.
pub fn body_text<'src>(close: char) -> impl Parser<'src, &'src str, String> + Clone {
    none_of([close, '\n', '\r'])
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(|text| text.trim().to_string())
}

/// Parse `open text close` with single-character delimiters.
pub fn delimited_text<'src>(open: char, close: char) -> impl Parser<'src, &'src str, String> + Clone {
    just(open)
        .ignore_then(body_text(close))
        .then_ignore(just(close))
}

/// Parse an edge label `|text|` and any whitespace after it.
pub fn edge_label<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    delimited_text('|', '|')
        .then_ignore(inline_whitespace())
        .labelled("edge label")
}

/// Consume whatever is left of the input.
///
/// Node references tolerate trailing noise (`;`, `:::class` suffixes and the
/// like) the same way the notation's producers emit it.
pub fn rest_of_input<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    any().repeated().ignored()
}
