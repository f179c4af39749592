//! Core diagram trait and the shared translation driver
//!
//! A diagram kind bundles its database, parser, generator and detector.
//! [`translate`] runs parser and generator over one notation text and never
//! fails: absent, blank or unreadable notation yields the generator skeleton.

use std::sync::Arc;

use tracing::{debug, span, warn, Level};

use super::{Database, Detector, Generator, Parser};

/// Core trait for diagram kinds
///
/// # Example
/// ```
/// use plantsmith::core::Diagram;
/// use plantsmith::plugins::process_flow::ProcessFlowDiagram;
///
/// assert_eq!(ProcessFlowDiagram::name(), "process-flow");
/// ```
pub trait Diagram: Send + Sync {
    /// Database type populated by the parser
    type Database: Database;

    /// The parser type for this diagram
    type Parser: Parser<Self::Database>;

    /// The generator type for this diagram
    type Generator: Generator<Self::Database>;

    /// Get the detector for this diagram kind
    fn detector() -> Arc<dyn Detector>;

    /// Create a new parser instance
    fn create_parser() -> Self::Parser;

    /// Create a new database instance
    fn create_database() -> Self::Database;

    /// Create a new generator instance
    fn create_generator() -> Self::Generator;

    /// Get the name of this diagram kind
    fn name() -> &'static str;

    /// Get the version of this diagram kind
    fn version() -> &'static str;
}

/// Translate notation text into diagram text
///
/// `None`, blank notation, or notation that registers no nodes produce the
/// generator's skeleton. Parser or generator errors are logged and also
/// degrade to the skeleton.
pub fn translate<D, P, G>(parser: &P, generator: &G, mut database: D, notation: Option<&str>) -> String
where
    D: Database,
    P: Parser<D>,
    G: Generator<D>,
{
    let translate_span = span!(
        Level::INFO,
        "translate",
        parser = parser.name(),
        input_len = notation.map(str::len).unwrap_or(0)
    );
    let _enter = translate_span.enter();

    let Some(notation) = notation.filter(|text| !text.trim().is_empty()) else {
        debug!("No notation text, emitting skeleton");
        return generator.skeleton();
    };

    if let Err(error) = parser.parse(notation, &mut database) {
        warn!(%error, "Parser failed, emitting skeleton");
        return generator.skeleton();
    }

    if database.node_count() == 0 {
        debug!("Notation registered no nodes, emitting skeleton");
        return generator.skeleton();
    }

    match generator.generate(&database) {
        Ok(text) => {
            debug!(
                node_count = database.node_count(),
                edge_count = database.edge_count(),
                output_len = text.len(),
                "Translation completed"
            );
            text
        }
        Err(error) => {
            warn!(%error, "Generator failed, emitting skeleton");
            generator.skeleton()
        }
    }
}
