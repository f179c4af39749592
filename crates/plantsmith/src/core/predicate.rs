//! Decision predicates for process-flow translation
//!
//! Whether a source node opens a conditional block is decided from its
//! display text alone. The check is pluggable so callers can swap the
//! language-specific heuristic for their own.

use std::sync::Arc;

/// Decides whether a node's display text reads as a decision
pub trait DecisionPredicate: Send + Sync {
    /// True when `text` should open a conditional block
    fn is_decision(&self, text: &str) -> bool;
}

impl<F> DecisionPredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_decision(&self, text: &str) -> bool {
        self(text)
    }
}

/// Shared handle to a predicate
pub type SharedPredicate = Arc<dyn DecisionPredicate>;

/// Default predicate: a literal marker character or an interrogative word
///
/// Markers are matched as-is; interrogatives are matched as case-insensitive
/// substrings. The defaults are `?` and the Russian particles `как` and `ли`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterrogativePredicate {
    markers: Vec<String>,
    interrogatives: Vec<String>,
}

impl InterrogativePredicate {
    /// Create the default predicate
    pub fn new() -> Self {
        Self {
            markers: vec!["?".to_string()],
            interrogatives: vec!["как".to_string(), "ли".to_string()],
        }
    }

    /// A predicate that only looks at literal markers
    pub fn markers_only() -> Self {
        Self {
            markers: vec!["?".to_string()],
            interrogatives: Vec::new(),
        }
    }

    /// Replace the literal markers
    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the interrogative substrings
    pub fn with_interrogatives<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interrogatives = words
            .into_iter()
            .map(|word| word.into().to_lowercase())
            .collect();
        self
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn interrogatives(&self) -> &[String] {
        &self.interrogatives
    }
}

impl Default for InterrogativePredicate {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionPredicate for InterrogativePredicate {
    fn is_decision(&self, text: &str) -> bool {
        if self.markers.iter().any(|marker| text.contains(marker.as_str())) {
            return true;
        }
        if self.interrogatives.is_empty() {
            return false;
        }
        let lowered = text.to_lowercase();
        self.interrogatives
            .iter()
            .any(|word| lowered.contains(word.as_str()))
    }
}
