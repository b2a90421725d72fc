//! Boolean predicates over the classifier.
//!
//! Only the outermost layer is inspected; nothing is dereferenced.

use crate::classify::{classify, Kind};
use crate::model::Value;
use crate::registry::VariantRegistry;

/// True if `value` is a cell recognised by any registered variant
pub fn is_wrapper_cell_in(value: &Value, registry: &VariantRegistry) -> bool {
    classify(value, registry).is_wrapper_cell()
}

/// True if `value` is a cell recognised as the variant tagged `variant`
pub fn is_variant_in(value: &Value, variant: &str, registry: &VariantRegistry) -> bool {
    matches!(classify(value, registry), Kind::WrapperCell(spec) if spec.tag() == variant)
}

/// [`is_wrapper_cell_in`] against the standard registry
pub fn is_wrapper_cell(value: &Value) -> bool {
    is_wrapper_cell_in(value, &VariantRegistry::default())
}

/// [`is_variant_in`] against the standard registry
pub fn is_variant(value: &Value, variant: &str) -> bool {
    is_variant_in(value, variant, &VariantRegistry::default())
}
