pub mod cell;
pub mod value;

pub use cell::{computed, observable, try_computed, Computed, Observable, WrapperCell};
pub use value::{Mapping, PlainObject, Value};
