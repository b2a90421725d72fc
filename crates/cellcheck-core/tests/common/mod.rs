use std::cell::Cell;
use std::rc::Rc;

use cellcheck_core::errors::DereferenceError;
use cellcheck_core::model::{computed, Observable, Value, WrapperCell};

/// An observable whose value is a mapping pointing back at the observable
///
/// `x = observable({ foo: x })`
#[allow(dead_code)]
pub fn self_referential() -> Value {
    let x = Observable::empty();
    x.set(Value::map([("foo", Value::from(x.clone()))]));
    Value::from(x)
}

/// `computed(computed(n))`
#[allow(dead_code)]
pub fn nested_computed(n: i32) -> Value {
    computed(move || computed(move || n))
}

/// `depth` computed cells, each allocated only when its parent is read
#[allow(dead_code)]
pub fn fresh_computed_chain(depth: usize, leaf: i32) -> Value {
    if depth == 0 {
        return Value::from(leaf);
    }
    computed(move || fresh_computed_chain(depth - 1, leaf))
}

/// A cell from another library, tagged `signal`, counting dereferences
#[allow(dead_code)]
pub struct Signal {
    pub value: Value,
    pub reads: Cell<usize>,
}

#[allow(dead_code)]
impl Signal {
    pub fn new(value: impl Into<Value>) -> Rc<Self> {
        Rc::new(Self {
            value: value.into(),
            reads: Cell::new(0),
        })
    }
}

impl WrapperCell for Signal {
    fn variant(&self) -> &str {
        "signal"
    }

    fn dereference(&self) -> Result<Value, DereferenceError> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.value.clone())
    }
}
