use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::DereferenceError;

use super::value::Value;

/// The wrapper-cell capability: a variant tag, an optional display label and
/// a zero-argument dereference.
///
/// Anything implementing this trait can be placed in a [`Value::Cell`]; whether
/// the engine unwraps it depends on whether its tag is registered in the
/// [`VariantRegistry`](crate::registry::VariantRegistry).
pub trait WrapperCell {
    /// Variant tag, e.g. `observable`
    fn variant(&self) -> &str;

    /// Identity label shown by the inspector; never used for equality
    fn label(&self) -> Option<&str> {
        None
    }

    /// Produce the value currently held by the cell
    ///
    /// # Errors
    /// Returns `DereferenceError` when the cell cannot produce a value, e.g.
    /// because it was disposed.
    fn dereference(&self) -> Result<Value, DereferenceError>;
}

pub const OBSERVABLE: &str = "observable";
pub const COMPUTED: &str = "computed";

/// An eager holder whose value can be replaced after creation
///
/// Because the handle is shared, an observable can be stored inside the value
/// it holds, which is how self-referential graphs are built.
pub struct Observable {
    value: RefCell<Value>,
    id: Option<String>,
}

impl Observable {
    pub fn new(value: impl Into<Value>) -> Rc<Self> {
        Rc::new(Self {
            value: RefCell::new(value.into()),
            id: None,
        })
    }

    /// An observable holding `null`, to be filled later with [`Observable::set`]
    pub fn empty() -> Rc<Self> {
        Self::new(Value::Null)
    }

    pub fn with_id(value: impl Into<Value>, id: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            value: RefCell::new(value.into()),
            id: Some(id.into()),
        })
    }

    /// Replace the held value
    pub fn set(&self, value: impl Into<Value>) {
        *self.value.borrow_mut() = value.into();
    }
}

impl WrapperCell for Observable {
    fn variant(&self) -> &str {
        OBSERVABLE
    }

    fn label(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn dereference(&self) -> Result<Value, DereferenceError> {
        self.value
            .try_borrow()
            .map(|v| v.clone())
            .map_err(|_| self.error("value is being replaced"))
    }
}

impl Observable {
    fn error(&self, message: &str) -> DereferenceError {
        let err = DereferenceError::new(OBSERVABLE, message);
        match &self.id {
            Some(id) => err.with_label(id.clone()),
            None => err,
        }
    }
}

type Compute = Box<dyn Fn() -> Result<Value, DereferenceError>>;

/// A derived cell that recomputes its value on every dereference
pub struct Computed {
    compute: Compute,
    id: Option<String>,
}

impl Computed {
    pub fn new<F, V>(f: F) -> Rc<Self>
    where
        F: Fn() -> V + 'static,
        V: Into<Value>,
    {
        Self::fallible(move || Ok(f().into()))
    }

    /// A computed cell whose computation may fail
    pub fn fallible<F>(f: F) -> Rc<Self>
    where
        F: Fn() -> Result<Value, DereferenceError> + 'static,
    {
        Rc::new(Self {
            compute: Box::new(f),
            id: None,
        })
    }

    pub fn with_id<F, V>(f: F, id: impl Into<String>) -> Rc<Self>
    where
        F: Fn() -> V + 'static,
        V: Into<Value>,
    {
        Rc::new(Self {
            compute: Box::new(move || Ok(f().into())),
            id: Some(id.into()),
        })
    }
}

impl WrapperCell for Computed {
    fn variant(&self) -> &str {
        COMPUTED
    }

    fn label(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn dereference(&self) -> Result<Value, DereferenceError> {
        (self.compute)()
    }
}

/// Wrap a value in a fresh observable
pub fn observable(value: impl Into<Value>) -> Value {
    Value::from(Observable::new(value))
}

/// Wrap a computation in a fresh computed cell
pub fn computed<F, V>(f: F) -> Value
where
    F: Fn() -> V + 'static,
    V: Into<Value>,
{
    Value::from(Computed::new(f))
}

/// Wrap a fallible computation in a fresh computed cell
pub fn try_computed<F>(f: F) -> Value
where
    F: Fn() -> Result<Value, DereferenceError> + 'static,
{
    Value::from(Computed::fallible(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observable_set_replaces_value() {
        let x = Observable::new(1);
        x.set(2);
        assert!(matches!(x.dereference(), Ok(Value::Number(n)) if n == 2.0));
    }

    #[test]
    fn test_observable_label() {
        let x = Observable::with_id(1, "count");
        assert_eq!(x.label(), Some("count"));
        assert_eq!(x.variant(), OBSERVABLE);
    }

    #[test]
    fn test_computed_recomputes() {
        let source = Observable::new(1);
        let s = source.clone();
        let doubled = Computed::new(move || match s.dereference() {
            Ok(Value::Number(n)) => Value::from(n * 2.0),
            _ => Value::Null,
        });

        assert!(matches!(doubled.dereference(), Ok(Value::Number(n)) if n == 2.0));
        source.set(5);
        assert!(matches!(doubled.dereference(), Ok(Value::Number(n)) if n == 10.0));
    }

    #[test]
    fn test_fallible_computed_propagates_error() {
        let cell = Computed::fallible(|| Err(DereferenceError::new(COMPUTED, "disposed")));
        let err = cell.dereference().unwrap_err();
        assert_eq!(err.message, "disposed");
    }
}
