//! Core error types for diagram processing
//!
//! Malformed notation and broken PlantUML are never errors: translators skip
//! what they cannot read and the repair engine reports issues as data. The
//! variants below cover the remaining failure kinds, most importantly the
//! rendering boundary, which is kept distinct from translation outcomes.

use thiserror::Error;

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message} at line {line}")]
    ParseError { message: String, line: usize },

    #[error("Generate error: {message}")]
    GenerateError { message: String },

    #[error("Detection error: {message}")]
    DetectionError { message: String },

    /// The external renderer could not produce an image.
    #[error("Rendering unavailable: {message}")]
    RenderingUnavailable { message: String },

    #[error("Invalid notation document: {source}")]
    InvalidDocument {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Unknown diagram type: {diagram_type}")]
    UnknownDiagramType { diagram_type: String },
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>, line: usize) -> Self {
        Self::ParseError {
            message: message.into(),
            line,
        }
    }

    /// Create a new generate error
    pub fn generate_error(message: impl Into<String>) -> Self {
        Self::GenerateError {
            message: message.into(),
        }
    }

    /// Create a new detection error
    pub fn detection_error(message: impl Into<String>) -> Self {
        Self::DetectionError {
            message: message.into(),
        }
    }

    /// Create a new rendering-unavailable error
    pub fn rendering_unavailable(message: impl Into<String>) -> Self {
        Self::RenderingUnavailable {
            message: message.into(),
        }
    }

    /// True when the failure came from the rendering collaborator
    pub fn is_rendering_unavailable(&self) -> bool {
        matches!(self, Self::RenderingUnavailable { .. })
    }
}
