//! Line-level helpers shared by the notation parsers
//!
//! Statements are one per line. Before chumsky sees anything, a line is cut
//! at its connectors so that each piece holds one node reference (optionally
//! preceded by the `|label|` of the edge that ends at it).

/// Keywords that open a notation text and carry no edges
const DECLARATIONS: [&str; 2] = ["flowchart", "graph"];

/// True for lines that never carry a statement: blank lines, `%%` comments
/// and the diagram declaration (`flowchart TD`, `graph LR`, ...).
pub fn is_skippable_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with("%%") {
        return true;
    }
    let first_word = trimmed.split_whitespace().next().unwrap_or_default();
    DECLARATIONS
        .iter()
        .any(|keyword| first_word.eq_ignore_ascii_case(keyword))
}

/// A piece of a statement between connectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The connector that precedes this piece (`None` for the first piece)
    pub connector: Option<&'static str>,
    /// The trimmed text of the piece
    pub text: &'a str,
}

/// Cut a statement at every connector occurrence.
///
/// Connectors are searched left to right; when two start at the same
/// position the longer one wins. A statement without connectors yields a
/// single segment.
pub fn split_on_connectors<'a>(statement: &'a str, connectors: &[&'static str]) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut pending: Option<&'static str> = None;

    while let Some((pos, connector)) = find_next_connector(statement, cursor, connectors) {
        segments.push(Segment {
            connector: pending,
            text: statement[cursor..pos].trim(),
        });
        pending = Some(connector);
        cursor = pos + connector.len();
    }

    segments.push(Segment {
        connector: pending,
        text: statement[cursor..].trim(),
    });
    segments
}

fn find_next_connector(
    statement: &str,
    start: usize,
    connectors: &[&'static str],
) -> Option<(usize, &'static str)> {
    connectors
        .iter()
        .filter_map(|&conn| statement[start..].find(conn).map(|pos| (start + pos, conn)))
        .min_by(|(pos_a, conn_a), (pos_b, conn_b)| {
            pos_a.cmp(pos_b).then(conn_b.len().cmp(&conn_a.len()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONNECTORS: [&str; 2] = ["-->", "-.->"];

    #[test]
    fn test_skippable_lines() {
        assert!(is_skippable_line(""));
        assert!(is_skippable_line("   "));
        assert!(is_skippable_line("%% comment"));
        assert!(is_skippable_line("flowchart TD"));
        assert!(is_skippable_line("graph LR"));
        assert!(!is_skippable_line("A --> B"));
        assert!(!is_skippable_line("graphic[Draw] --> B"));
    }

    #[test]
    fn test_split_single_edge() {
        let segments = split_on_connectors("A[Start] -->|go| B[End]", &CONNECTORS);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].connector, None);
        assert_eq!(segments[0].text, "A[Start]");
        assert_eq!(segments[1].connector, Some("-->"));
        assert_eq!(segments[1].text, "|go| B[End]");
    }

    #[test]
    fn test_split_chain_with_mixed_connectors() {
        let segments = split_on_connectors("A --> B -.-> C", &CONNECTORS);
        let texts: Vec<_> = segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);
        assert_eq!(segments[2].connector, Some("-.->"));
    }

    #[test]
    fn test_split_without_connector() {
        let segments = split_on_connectors("just text", &CONNECTORS);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "just text");
    }

    #[test]
    fn test_longer_connector_wins_at_same_position() {
        let segments = split_on_connectors("A ==> B", &["==", "==>"]);
        assert_eq!(segments[1].connector, Some("==>"));
        assert_eq!(segments[1].text, "B");
    }
}
