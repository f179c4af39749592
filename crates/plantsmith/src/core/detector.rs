//! Core detector trait for notation kind identification

/// Core trait for notation kind detectors
///
/// Each diagram kind provides a detector that recognises its notation.
///
/// # Example
/// ```
/// use plantsmith::core::Detector;
/// use plantsmith::plugins::actor_interaction::ActorInteractionDetector;
///
/// let detector = ActorInteractionDetector::new();
/// assert!(detector.detect("A[User] --> B((Login))"));
/// ```
pub trait Detector: Send + Sync {
    /// Detect if the input matches this notation kind
    fn detect(&self, input: &str) -> bool;

    /// Get the confidence level of the detection (0.0 to 1.0)
    fn confidence(&self, input: &str) -> f64;

    /// Get the diagram kind name
    fn diagram_type(&self) -> &'static str;

    /// Get key patterns that this detector looks for
    fn patterns(&self) -> Vec<&'static str>;
}
