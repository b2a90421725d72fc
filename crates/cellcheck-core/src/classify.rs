//! Value classification and one-level unwrapping.

use crate::errors::DereferenceError;
use crate::model::{Value, WrapperCell};
use crate::registry::{VariantRegistry, VariantSpec};

/// The kind a value classifies as at comparison time
#[derive(Debug, Clone, Copy)]
pub enum Kind<'r> {
    Primitive,
    Sequence,
    Mapping,
    PlainObject,
    /// A cell recognised by a registered variant
    WrapperCell(&'r VariantSpec),
    /// A cell whose tag no registered variant recognises
    Opaque,
}

impl Kind<'_> {
    /// Short name used in logs and summaries
    pub fn name(&self) -> &str {
        match self {
            Kind::Primitive => "primitive",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
            Kind::PlainObject => "plain_object",
            Kind::WrapperCell(spec) => spec.tag(),
            Kind::Opaque => "opaque",
        }
    }

    pub fn is_wrapper_cell(&self) -> bool {
        matches!(self, Kind::WrapperCell(_))
    }
}

/// Classify a value against the registry
///
/// Classification is computed fresh on every call; nothing is cached.
pub fn classify<'r>(value: &Value, registry: &'r VariantRegistry) -> Kind<'r> {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Str(_) => Kind::Primitive,
        Value::Seq(_) => Kind::Sequence,
        Value::Map(_) => Kind::Mapping,
        Value::Object(_) => Kind::PlainObject,
        Value::Cell(cell) => match registry.recognize(cell.as_ref()) {
            Some(spec) => Kind::WrapperCell(spec),
            None => Kind::Opaque,
        },
    }
}

/// Dereference a cell once
///
/// # Errors
/// Whatever the cell's dereference returns, unchanged.
pub fn unwrap(cell: &dyn WrapperCell) -> Result<Value, DereferenceError> {
    cell.dereference()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{computed, observable};

    #[test]
    fn test_classify_primitives() {
        let registry = VariantRegistry::default();
        for v in [Value::Null, Value::from(true), Value::from(1.5), Value::str("s")] {
            assert!(matches!(classify(&v, &registry), Kind::Primitive));
        }
    }

    #[test]
    fn test_classify_composites() {
        let registry = VariantRegistry::default();
        assert!(matches!(
            classify(&Value::seq([1]), &registry),
            Kind::Sequence
        ));
        assert!(matches!(
            classify(&Value::map([("a", 1)]), &registry),
            Kind::Mapping
        ));
        assert!(matches!(
            classify(&Value::object("Point", [("x", 1)]), &registry),
            Kind::PlainObject
        ));
    }

    #[test]
    fn test_classify_cells_refines_variant() {
        let registry = VariantRegistry::default();
        let kind = classify(&observable(1), &registry);
        assert_eq!(kind.name(), "observable");
        assert!(kind.is_wrapper_cell());

        let kind = classify(&computed(|| 1), &registry);
        assert_eq!(kind.name(), "computed");
    }

    #[test]
    fn test_unregistered_cell_is_opaque() {
        let registry = VariantRegistry::empty();
        assert!(matches!(classify(&observable(1), &registry), Kind::Opaque));
    }

    #[test]
    fn test_unwrap_is_one_level() {
        let inner = observable(42);
        let outer = observable(inner.clone());
        let held = unwrap(outer.as_cell().unwrap()).unwrap();
        assert!(held.same_reference(&inner));
    }
}
