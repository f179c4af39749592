//! Actor-interaction diagram plugin
//!
//! Translates actor/use-case notation (`A[User] --> B((Login))`) into a
//! PlantUML use-case diagram.

use crate::core::{Detector, Diagram};
use std::sync::Arc;

mod chumsky_parser;
mod database;
mod detector;
mod generator;
mod parser;

pub use chumsky_parser::{ChumskyInteractionParser, InteractionSegment};
pub use database::*;
pub use detector::*;
pub use generator::*;
pub use parser::*;

/// Actor-interaction diagram implementation
pub struct ActorInteractionDiagram;

impl Diagram for ActorInteractionDiagram {
    type Database = ActorInteractionDatabase;
    type Parser = ActorInteractionParser;
    type Generator = ActorInteractionGenerator;

    fn detector() -> Arc<dyn Detector> {
        Arc::new(ActorInteractionDetector::new())
    }

    fn create_parser() -> Self::Parser {
        ActorInteractionParser::new()
    }

    fn create_database() -> Self::Database {
        ActorInteractionDatabase::new()
    }

    fn create_generator() -> Self::Generator {
        ActorInteractionGenerator::new()
    }

    fn name() -> &'static str {
        "actor-interaction"
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}
