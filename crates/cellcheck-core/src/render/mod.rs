//! Inspector: human-readable rendering of values and diffs.

pub mod diff_render;
pub mod value_render;

use crate::config::InspectConfig;
use crate::diff::model::DiffNode;
use crate::errors::DereferenceError;
use crate::model::Value;
use crate::registry::VariantRegistry;

pub use diff_render::render_diff;
pub use value_render::render_inline;

/// Renders values and diff trees against a variant registry
#[derive(Debug, Clone)]
pub struct Inspector<'r> {
    registry: &'r VariantRegistry,
    config: InspectConfig,
}

impl<'r> Inspector<'r> {
    pub fn new(registry: &'r VariantRegistry) -> Self {
        Self {
            registry,
            config: InspectConfig::default(),
        }
    }

    pub fn with_config(mut self, config: InspectConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &InspectConfig {
        &self.config
    }

    /// Single-line rendering of `value`
    ///
    /// # Errors
    /// * `DereferenceError` - a recognised cell failed to produce its value
    pub fn inspect(&self, value: &Value) -> Result<String, DereferenceError> {
        render_inline(value, self.registry)
    }

    /// Multi-line rendering of a diff tree
    ///
    /// # Errors
    /// * `DereferenceError` - a cell printed as context failed to produce its value
    pub fn render_diff(&self, diff: &DiffNode) -> Result<String, DereferenceError> {
        render_diff(diff, self.registry, &self.config)
    }

    /// Render `value`, or the diff produced from it when one is supplied
    ///
    /// The diff already carries the actual-side structure, so `value` is only
    /// printed directly when there is no diff.
    ///
    /// # Errors
    /// * `DereferenceError` - a recognised cell failed to produce its value
    pub fn format(&self, value: &Value, diff: Option<&DiffNode>) -> Result<String, DereferenceError> {
        match diff {
            Some(diff) => self.render_diff(diff),
            None => self.inspect(value),
        }
    }
}

/// [`Inspector::format`] with the standard registry and default config
///
/// # Errors
/// * `DereferenceError` - a recognised cell failed to produce its value
pub fn format(value: &Value, diff: Option<&DiffNode>) -> Result<String, DereferenceError> {
    let registry = VariantRegistry::default();
    Inspector::new(&registry).format(value, diff)
}
