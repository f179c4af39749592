//! Structured notation documents
//!
//! The surrounding system receives a JSON document from a conversational
//! model. Only the already-extracted notation fields matter here; every field
//! is optional so a document missing a key still translates to a skeleton.

use serde::{Deserialize, Serialize};

use super::DiagramError;

/// A document carrying the two notation texts and their context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotationDocument {
    /// Project title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Process-flow notation
    #[serde(
        default,
        rename = "flow_notation_text",
        alias = "bpmn_mermaid",
        skip_serializing_if = "Option::is_none"
    )]
    pub flow_notation: Option<String>,

    /// Actor-interaction notation
    #[serde(
        default,
        rename = "interaction_notation_text",
        alias = "usecase_mermaid",
        skip_serializing_if = "Option::is_none"
    )]
    pub interaction_notation: Option<String>,

    /// Requirements in Markdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements_md: Option<String>,
}

impl NotationDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from JSON text
    pub fn from_json(input: &str) -> Result<Self, DiagramError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Set the process-flow notation
    pub fn with_flow_notation(mut self, text: impl Into<String>) -> Self {
        self.flow_notation = Some(text.into());
        self
    }

    /// Set the actor-interaction notation
    pub fn with_interaction_notation(mut self, text: impl Into<String>) -> Self {
        self.interaction_notation = Some(text.into());
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
