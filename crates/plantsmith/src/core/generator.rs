//! Core generator trait for PlantUML output
//!
//! A generator turns a filled database into diagram description text.

use anyhow::Result;

use super::Database;

/// Core trait for diagram text generators
///
/// # Example
/// ```
/// use plantsmith::core::Generator;
/// use plantsmith::plugins::process_flow::{ProcessFlowDatabase, ProcessFlowGenerator};
///
/// let db = ProcessFlowDatabase::new();
/// let generator = ProcessFlowGenerator::new();
/// let text = generator.generate(&db).unwrap();
/// assert!(text.starts_with("@startuml"));
/// ```
pub trait Generator<D: Database>: Send + Sync {
    /// Emit diagram text for the database contents
    fn generate(&self, database: &D) -> Result<String>;

    /// The minimal diagram emitted when there is nothing to draw
    fn skeleton(&self) -> String;

    /// Get the name of this generator
    fn name(&self) -> &'static str;

    /// Get the version of this generator
    fn version(&self) -> &'static str;
}
