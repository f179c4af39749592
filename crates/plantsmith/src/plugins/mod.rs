//! Plugin implementations
//!
//! One plugin per notation kind, plus the PlantUML repair pass and the
//! orchestrator that chains them.

pub mod actor_interaction;
pub mod orchestrator;
pub mod process_flow;
pub mod repair;

pub use actor_interaction::*;
pub use orchestrator::*;
pub use process_flow::*;
pub use repair::*;
