//! Rendering configuration.

use serde::{Deserialize, Serialize};

/// Options for diff rendering
///
/// Deserializable so hosts can load it alongside their own settings; missing
/// fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Spaces per nesting level in multi-line output
    pub indent_width: usize,
    /// Collapse runs of equal siblings into a single `...` line
    pub elide_equal: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            elide_equal: true,
        }
    }
}

impl InspectConfig {
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_elide_equal(mut self, elide: bool) -> Self {
        self.elide_equal = elide;
        self
    }
}
