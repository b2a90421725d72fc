//! Assertion surface.
//!
//! Each assertion returns `Ok(())` when it holds and
//! [`AssertionError::Failed`] with a host-style message when it does not:
//!
//! ```
//! use cellcheck_core::assertions::to_equal;
//! use cellcheck_core::model::observable;
//!
//! let err = to_equal(&observable(42), &observable(24)).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "expected observable(42) to equal observable(24)\n\nobservable(\n  42 // should equal 24\n)"
//! );
//! ```

use crate::diff::engine::{Comparator, Outcome};
use crate::errors::AssertionError;
use crate::model::cell::COMPUTED;
use crate::model::Value;
use crate::predicates::{is_variant_in, is_wrapper_cell_in};
use crate::registry::VariantRegistry;
use crate::render::Inspector;

type AssertResult = std::result::Result<(), AssertionError>;

/// Assertions bound to a registry and inspector configuration
#[derive(Debug, Clone)]
pub struct Expect<'r> {
    comparator: Comparator<'r>,
    inspector: Inspector<'r>,
}

impl<'r> Expect<'r> {
    pub fn new(registry: &'r VariantRegistry) -> Self {
        Self {
            comparator: Comparator::new(registry),
            inspector: Inspector::new(registry),
        }
    }

    pub fn with_inspector(mut self, inspector: Inspector<'r>) -> Self {
        self.inspector = inspector;
        self
    }

    pub fn to_equal(&self, subject: &Value, expected: &Value) -> AssertResult {
        match self.comparator.equals(subject, expected)? {
            Outcome::Equal => Ok(()),
            Outcome::NotEqual(diff) => {
                let diff_text = self.inspector.render_diff(&diff)?;
                self.fail(subject, "to equal", Some(expected), Some(diff_text))
            }
        }
    }

    pub fn not_to_equal(&self, subject: &Value, expected: &Value) -> AssertResult {
        match self.comparator.equals(subject, expected)? {
            Outcome::NotEqual(_) => Ok(()),
            Outcome::Equal => self.fail(subject, "not to equal", Some(expected), None),
        }
    }

    /// Every key of `properties` must be present on `subject` with an equal value
    pub fn to_have_properties(&self, subject: &Value, properties: &Value) -> AssertResult {
        match self.comparator.compare_properties(subject, properties)? {
            Outcome::Equal => Ok(()),
            Outcome::NotEqual(diff) => {
                let diff_text = self.inspector.render_diff(&diff)?;
                self.fail(subject, "to have properties", Some(properties), Some(diff_text))
            }
        }
    }

    /// Holds for any recognised wrapper cell, whatever its variant
    pub fn to_be_observable(&self, subject: &Value) -> AssertResult {
        self.check(is_wrapper_cell_in(subject, self.registry()), subject, "to be observable")
    }

    pub fn not_to_be_observable(&self, subject: &Value) -> AssertResult {
        self.check(!is_wrapper_cell_in(subject, self.registry()), subject, "not to be observable")
    }

    pub fn to_be_computed(&self, subject: &Value) -> AssertResult {
        self.to_be_variant(subject, COMPUTED)
    }

    pub fn not_to_be_computed(&self, subject: &Value) -> AssertResult {
        self.not_to_be_variant(subject, COMPUTED)
    }

    /// The outermost layer of `subject` must be the variant tagged `variant`
    pub fn to_be_variant(&self, subject: &Value, variant: &str) -> AssertResult {
        let holds = is_variant_in(subject, variant, self.registry());
        self.check(holds, subject, &format!("to be {}", variant))
    }

    pub fn not_to_be_variant(&self, subject: &Value, variant: &str) -> AssertResult {
        let holds = !is_variant_in(subject, variant, self.registry());
        self.check(holds, subject, &format!("not to be {}", variant))
    }

    fn registry(&self) -> &'r VariantRegistry {
        self.comparator.registry()
    }

    fn check(&self, holds: bool, subject: &Value, phrase: &str) -> AssertResult {
        if holds {
            return Ok(());
        }
        self.fail(subject, phrase, None, None)
    }

    fn fail(
        &self,
        subject: &Value,
        phrase: &str,
        argument: Option<&Value>,
        diff: Option<String>,
    ) -> AssertResult {
        let mut message = format!("expected {} {}", self.inspector.inspect(subject)?, phrase);
        if let Some(argument) = argument {
            message.push_str(&format!(" {}", self.inspector.inspect(argument)?));
        }
        if let Some(diff) = diff {
            message.push_str(&format!("\n\n{}", diff));
        }
        tracing::debug!(assertion = phrase, "assertion failed");
        Err(AssertionError::Failed { message })
    }
}

/// [`Expect::to_equal`] against the standard registry
///
/// # Errors
/// * `Failed` - the values are not structurally equal
/// * `Compare` - the comparison raised a circular-structure or dereference error
pub fn to_equal(subject: &Value, expected: &Value) -> AssertResult {
    Expect::new(&VariantRegistry::default()).to_equal(subject, expected)
}

/// [`Expect::not_to_equal`] against the standard registry
///
/// # Errors
/// * `Failed` - the values are structurally equal
/// * `Compare` - the comparison raised a circular-structure or dereference error
pub fn not_to_equal(subject: &Value, expected: &Value) -> AssertResult {
    Expect::new(&VariantRegistry::default()).not_to_equal(subject, expected)
}

/// [`Expect::to_have_properties`] against the standard registry
///
/// # Errors
/// * `Failed` - a property is missing or differs
/// * `Compare` - the comparison raised a circular-structure or dereference error
pub fn to_have_properties(subject: &Value, properties: &Value) -> AssertResult {
    Expect::new(&VariantRegistry::default()).to_have_properties(subject, properties)
}

/// # Errors
/// * `Failed` - `subject` is not a wrapper cell
pub fn to_be_observable(subject: &Value) -> AssertResult {
    Expect::new(&VariantRegistry::default()).to_be_observable(subject)
}

/// # Errors
/// * `Failed` - `subject` is a wrapper cell
pub fn not_to_be_observable(subject: &Value) -> AssertResult {
    Expect::new(&VariantRegistry::default()).not_to_be_observable(subject)
}

/// # Errors
/// * `Failed` - `subject` is not a computed cell
pub fn to_be_computed(subject: &Value) -> AssertResult {
    Expect::new(&VariantRegistry::default()).to_be_computed(subject)
}

/// # Errors
/// * `Failed` - `subject` is a computed cell
pub fn not_to_be_computed(subject: &Value) -> AssertResult {
    Expect::new(&VariantRegistry::default()).not_to_be_computed(subject)
}

/// # Errors
/// * `Failed` - the outermost layer of `subject` is not `variant`
pub fn to_be_variant(subject: &Value, variant: &str) -> AssertResult {
    Expect::new(&VariantRegistry::default()).to_be_variant(subject, variant)
}
