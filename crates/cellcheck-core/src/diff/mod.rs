//! Structural comparison and diff trees.
//!
//! ## Entry point
//!
//! ```
//! use cellcheck_core::diff::equals;
//! use cellcheck_core::model::{computed, observable, Value};
//!
//! let outcome = equals(&observable(computed(|| 42)), &Value::from(42))?;
//! assert!(outcome.is_equal());
//! # Ok::<(), cellcheck_core::CompareError>(())
//! ```
//!
//! ## Guarantees
//!
//! - **Transparency**: wrapper cells are unwrapped on both sides; variant tags
//!   and identity labels never affect the verdict.
//! - **Strictness**: no coercion between kinds after unwrapping.
//! - **Termination**: revisiting an identity pair on the active path fails
//!   with `CircularStructure` instead of recursing.
//! - **Determinism**: diff entries follow the actual side's insertion order,
//!   then keys present only on the expected side.

pub mod engine;
pub mod model;

pub use engine::{equals, Comparator, Outcome};
pub use model::{DiffEntry, DiffKey, DiffNode, MismatchEntry, MismatchKind};
