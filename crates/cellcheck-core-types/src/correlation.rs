//! Correlation types for tracking comparisons in logs
//!
//! Every top-level comparison is tagged with a [`ComparisonId`] so that the
//! start/end events of one call can be told apart from those of another.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single top-level comparison
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparisonId(String);

impl ComparisonId {
    /// Generate a new random ComparisonId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for ComparisonId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ComparisonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through a comparison call for correlation
///
/// A host that runs several assertions as one logical check can reuse the
/// same `parent` label across them.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub comparison_id: ComparisonId,
    pub parent: Option<String>,
}

impl RequestContext {
    /// Create a new context with a fresh ComparisonId
    pub fn new() -> Self {
        Self {
            comparison_id: ComparisonId::new(),
            parent: None,
        }
    }

    /// Create a context with an existing ComparisonId
    pub fn with_comparison_id(comparison_id: ComparisonId) -> Self {
        Self {
            comparison_id,
            parent: None,
        }
    }

    /// Attach a parent label to the context
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
