//! Core abstractions for notation translation
//!
//! Defines the traits every diagram kind implements (database, parser,
//! generator, detector), the shared translation driver, the rendering
//! boundary and the ambient pieces (errors, logging, input documents).

pub mod chumsky_utils;
mod database;
mod detector;
mod diagram;
mod document;
mod error;
mod generator;
pub mod logging;
pub mod notation;
mod parser;
mod predicate;
mod render;

pub use database::*;
pub use detector::*;
pub use diagram::*;
pub use document::*;
pub use error::*;
pub use generator::*;
pub use logging::*;
pub use parser::*;
pub use predicate::*;
pub use render::*;
