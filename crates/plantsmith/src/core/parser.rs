//! Core parser trait for notation text
//!
//! A parser reads notation text into a database. Parsers never fail on bad
//! input: lines they cannot read are skipped and the database is left with
//! whatever was understood.

use anyhow::Result;

use super::Database;

/// Core trait for notation parsers
///
/// # Example
/// ```
/// use plantsmith::core::{Database, Parser};
/// use plantsmith::plugins::process_flow::{ProcessFlowDatabase, ProcessFlowParser};
///
/// let parser = ProcessFlowParser::new();
/// let mut db = ProcessFlowDatabase::new();
/// parser.parse("A[Start] --> B[Stop]", &mut db).unwrap();
/// assert_eq!(db.node_count(), 2);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse notation text into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input looks like something this parser understands
    fn can_parse(&self, input: &str) -> bool;
}
