//! Process-flow segment grammar using chumsky
//!
//! A segment is what sits between two connectors: an optional `|label|`
//! followed by a node reference `ID`, `ID[text]` or `ID{text}`. Anything after
//! the node reference is ignored.

use anyhow::Result;
use chumsky::prelude::*;

use super::database::FlowNodeKind;
use crate::core::chumsky_utils::{delimited_text, edge_label, identifier, inline_whitespace, rest_of_input};

/// Chumsky-based parser for process-flow segments
pub struct ChumskyFlowParser;

impl ChumskyFlowParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one segment of an edge statement
    pub fn parse_segment(&self, input: &str) -> Result<FlowSegment> {
        let parser = Self::segment_parser().then_ignore(end());

        parser
            .parse(input)
            .into_result()
            .map_err(|errors| anyhow::anyhow!("Parse errors: {:?}", errors))
    }

    fn segment_parser<'src>() -> impl Parser<'src, &'src str, FlowSegment> + Clone {
        edge_label()
            .or_not()
            .then(Self::node_reference())
            .then_ignore(rest_of_input())
            .map(|(label, node)| FlowSegment { label, node })
    }

    fn node_reference<'src>() -> impl Parser<'src, &'src str, FlowNodeRef> + Clone {
        identifier()
            .then_ignore(inline_whitespace())
            .then(Self::node_body().or_not())
            .map(|(id, body)| FlowNodeRef { id, body })
            .labelled("node reference")
    }

    fn node_body<'src>() -> impl Parser<'src, &'src str, (String, FlowNodeKind)> + Clone {
        let action = delimited_text('[', ']').map(|text| (text, FlowNodeKind::Action));
        let decision = delimited_text('{', '}').map(|text| (text, FlowNodeKind::Decision));

        action.or(decision)
    }
}

impl Default for ChumskyFlowParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A node reference inside an edge statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNodeRef {
    pub id: String,
    /// Display text and kind, when the reference declares them
    pub body: Option<(String, FlowNodeKind)>,
}

/// One parsed segment of an edge statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSegment {
    /// Label of the edge that ends at this segment
    pub label: Option<String>,
    pub node: FlowNodeRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_reference() {
        let parser = ChumskyFlowParser::new();
        let segment = parser.parse_segment("A[Open the app]").unwrap();
        assert_eq!(segment.label, None);
        assert_eq!(segment.node.id, "A");
        assert_eq!(
            segment.node.body,
            Some(("Open the app".to_string(), FlowNodeKind::Action))
        );
    }

    #[test]
    fn test_decision_reference() {
        let parser = ChumskyFlowParser::new();
        let segment = parser.parse_segment("B{Logged in?}").unwrap();
        assert_eq!(
            segment.node.body,
            Some(("Logged in?".to_string(), FlowNodeKind::Decision))
        );
    }

    #[test]
    fn test_labelled_reference() {
        let parser = ChumskyFlowParser::new();
        let segment = parser.parse_segment("|Yes| C[Show menu]").unwrap();
        assert_eq!(segment.label.as_deref(), Some("Yes"));
        assert_eq!(segment.node.id, "C");
    }

    #[test]
    fn test_bare_reference_with_trailing_noise() {
        let parser = ChumskyFlowParser::new();
        let segment = parser.parse_segment("D;").unwrap();
        assert_eq!(segment.node.id, "D");
        assert_eq!(segment.node.body, None);
    }

    #[test]
    fn test_space_before_body() {
        let parser = ChumskyFlowParser::new();
        let segment = parser.parse_segment("E [Spaced]").unwrap();
        assert_eq!(
            segment.node.body,
            Some(("Spaced".to_string(), FlowNodeKind::Action))
        );
    }

    #[test]
    fn test_rejects_non_identifier_start() {
        let parser = ChumskyFlowParser::new();
        assert!(parser.parse_segment("[No id]").is_err());
        assert!(parser.parse_segment("").is_err());
    }
}
