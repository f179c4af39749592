//! Actor-interaction segment grammar using chumsky
//!
//! Node references are `ID`, `ID[text]` (actor) or `ID((text))` (use case),
//! optionally preceded by an edge `|label|`.

use anyhow::Result;
use chumsky::prelude::*;

use super::database::ActorKind;
use crate::core::chumsky_utils::{
    body_text, delimited_text, edge_label, identifier, inline_whitespace, rest_of_input,
};

/// Chumsky-based parser for actor-interaction segments
pub struct ChumskyInteractionParser;

impl ChumskyInteractionParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_segment(&self, input: &str) -> Result<InteractionSegment> {
        let parser = Self::segment_parser().then_ignore(end());

        parser
            .parse(input)
            .into_result()
            .map_err(|errors| anyhow::anyhow!("Parse errors: {:?}", errors))
    }

    fn segment_parser<'src>() -> impl Parser<'src, &'src str, InteractionSegment> + Clone {
        edge_label()
            .or_not()
            .then(identifier())
            .then_ignore(inline_whitespace())
            .then(Self::node_body().or_not())
            .then_ignore(rest_of_input())
            .map(|((label, id), body)| InteractionSegment { label, id, body })
    }

    fn node_body<'src>() -> impl Parser<'src, &'src str, (String, ActorKind)> + Clone {
        let use_case = just("((")
            .ignore_then(body_text(')'))
            .then_ignore(just("))"))
            .map(|text| (text, ActorKind::UseCase))
            .labelled("use case");
        let actor = delimited_text('[', ']')
            .map(|text| (text, ActorKind::Actor))
            .labelled("actor");

        use_case.or(actor)
    }
}

impl Default for ChumskyInteractionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// One parsed segment of a relationship statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionSegment {
    pub label: Option<String>,
    pub id: String,
    pub body: Option<(String, ActorKind)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_and_use_case_forms() {
        let parser = ChumskyInteractionParser::new();

        let actor = parser.parse_segment("A[User]").unwrap();
        assert_eq!(actor.body, Some(("User".to_string(), ActorKind::Actor)));

        let use_case = parser.parse_segment("B((Login))").unwrap();
        assert_eq!(use_case.id, "B");
        assert_eq!(use_case.body, Some(("Login".to_string(), ActorKind::UseCase)));
    }

    #[test]
    fn test_labelled_use_case() {
        let parser = ChumskyInteractionParser::new();
        let segment = parser.parse_segment("|extends| C(( Reset password ))").unwrap();
        assert_eq!(segment.label.as_deref(), Some("extends"));
        assert_eq!(
            segment.body,
            Some(("Reset password".to_string(), ActorKind::UseCase))
        );
    }

    #[test]
    fn test_single_parenthesis_is_not_a_use_case() {
        let parser = ChumskyInteractionParser::new();
        let segment = parser.parse_segment("B(Rounded)").unwrap();
        assert_eq!(segment.id, "B");
        assert_eq!(segment.body, None);
    }

    #[test]
    fn test_bare_identifier() {
        let parser = ChumskyInteractionParser::new();
        let segment = parser.parse_segment("Admin").unwrap();
        assert_eq!(segment.id, "Admin");
        assert_eq!(segment.body, None);
    }
}
