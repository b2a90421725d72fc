//! Table of recognised wrapper-cell variants
//!
//! The classifier walks this table in registration order and the first
//! variant whose predicate accepts a cell wins. Adding a variant never touches
//! the engine.

use crate::errors::RegistryError;
use crate::model::cell::{COMPUTED, OBSERVABLE};
use crate::model::WrapperCell;

type CellPredicate = Box<dyn Fn(&dyn WrapperCell) -> bool>;

/// One registered variant: a tag, the predicate that recognises it, and the
/// prefix the inspector prints before the opening parenthesis.
pub struct VariantSpec {
    tag: String,
    display_prefix: String,
    predicate: CellPredicate,
}

impl VariantSpec {
    /// A variant recognised by an exact tag match and displayed by its tag
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let expected = tag.clone();
        Self {
            display_prefix: tag.clone(),
            tag,
            predicate: Box::new(move |cell: &dyn WrapperCell| cell.variant() == expected),
        }
    }

    pub fn with_display_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.display_prefix = prefix.into();
        self
    }

    /// Replace the default tag-equality predicate
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&dyn WrapperCell) -> bool + 'static,
    {
        self.predicate = Box::new(predicate);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn display_prefix(&self) -> &str {
        &self.display_prefix
    }

    pub fn matches(&self, cell: &dyn WrapperCell) -> bool {
        (self.predicate)(cell)
    }
}

impl std::fmt::Debug for VariantSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantSpec")
            .field("tag", &self.tag)
            .field("display_prefix", &self.display_prefix)
            .finish_non_exhaustive()
    }
}

/// Ordered variant table consulted by the classifier
#[derive(Debug)]
pub struct VariantRegistry {
    variants: Vec<VariantSpec>,
}

impl VariantRegistry {
    /// A registry with no variants; every cell classifies as opaque
    pub fn empty() -> Self {
        Self {
            variants: Vec::new(),
        }
    }

    /// Append a variant
    ///
    /// # Errors
    /// * `EmptyTag` - the tag is empty
    /// * `DuplicateVariant` - a variant with the same tag is already registered
    pub fn register(&mut self, spec: VariantSpec) -> Result<(), RegistryError> {
        if spec.tag.is_empty() {
            return Err(RegistryError::EmptyTag);
        }
        if self.get(&spec.tag).is_some() {
            return Err(RegistryError::DuplicateVariant { tag: spec.tag });
        }
        tracing::debug!(variant = %spec.tag, "registered wrapper variant");
        self.variants.push(spec);
        Ok(())
    }

    /// Builder form of [`register`](Self::register)
    ///
    /// # Errors
    /// Same as `register`.
    pub fn with_variant(mut self, spec: VariantSpec) -> Result<Self, RegistryError> {
        self.register(spec)?;
        Ok(self)
    }

    /// First registered variant recognising the cell
    pub fn recognize(&self, cell: &dyn WrapperCell) -> Option<&VariantSpec> {
        self.variants.iter().find(|spec| spec.matches(cell))
    }

    pub fn get(&self, tag: &str) -> Option<&VariantSpec> {
        self.variants.iter().find(|spec| spec.tag == tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|spec| spec.tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// The standard `observable` and `computed` variants, in that order
impl Default for VariantRegistry {
    fn default() -> Self {
        Self {
            variants: vec![VariantSpec::new(OBSERVABLE), VariantSpec::new(COMPUTED)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DereferenceError;
    use crate::model::{Computed, Observable, Value};

    struct Signal;

    impl WrapperCell for Signal {
        fn variant(&self) -> &str {
            "signal"
        }

        fn dereference(&self) -> Result<Value, DereferenceError> {
            Ok(Value::from(1))
        }
    }

    #[test]
    fn test_default_registry_order() {
        let registry = VariantRegistry::default();
        let tags: Vec<&str> = registry.tags().collect();
        assert_eq!(tags, vec![OBSERVABLE, COMPUTED]);
    }

    #[test]
    fn test_recognize_standard_cells() {
        let registry = VariantRegistry::default();
        let obs = Observable::new(1);
        let comp = Computed::new(|| 1);

        assert_eq!(registry.recognize(obs.as_ref()).map(|s| s.tag()), Some(OBSERVABLE));
        assert_eq!(registry.recognize(comp.as_ref()).map(|s| s.tag()), Some(COMPUTED));
        assert!(registry.recognize(&Signal).is_none());
    }

    #[test]
    fn test_register_custom_variant() {
        let registry = VariantRegistry::default()
            .with_variant(VariantSpec::new("signal").with_display_prefix("sig"))
            .unwrap();

        let spec = registry.recognize(&Signal).unwrap();
        assert_eq!(spec.tag(), "signal");
        assert_eq!(spec.display_prefix(), "sig");
    }

    #[test]
    fn test_duplicate_variant_rejected() {
        let mut registry = VariantRegistry::default();
        let err = registry.register(VariantSpec::new(OBSERVABLE)).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateVariant {
                tag: OBSERVABLE.to_string()
            }
        );
    }

    #[test]
    fn test_empty_tag_rejected() {
        let mut registry = VariantRegistry::empty();
        assert_eq!(
            registry.register(VariantSpec::new("")),
            Err(RegistryError::EmptyTag)
        );
    }

    #[test]
    fn test_first_match_wins() {
        let registry = VariantRegistry::empty()
            .with_variant(VariantSpec::new("any").with_predicate(|_| true))
            .unwrap()
            .with_variant(VariantSpec::new(OBSERVABLE))
            .unwrap();

        let obs = Observable::new(1);
        assert_eq!(registry.recognize(obs.as_ref()).map(|s| s.tag()), Some("any"));
    }
}
