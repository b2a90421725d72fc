//! Cellcheck Core - structural equality over lazily unwrapped values
//!
//! This crate compares values that may contain lazy wrapper cells
//! (observables, computed cells) as if the cells were transparent, including:
//! - Value model with shared composites and pluggable wrapper cells
//! - Table-driven variant registry and value classification
//! - Equality engine with per-call cycle detection and structured diffs
//! - Inspector rendering values as nested calls with annotated mismatches
//! - Predicates and a thin assertion surface with host-style messages

pub mod assertions;
pub mod classify;
pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod predicates;
pub mod registry;
pub mod render;

// Used by the logging macros
pub use cellcheck_core_types;
pub use cellcheck_core_types::{ComparisonId, RequestContext};

// Re-export commonly used types
pub use classify::{classify, Kind};
pub use config::InspectConfig;
pub use diff::{equals, Comparator, DiffNode, Outcome};
pub use errors::{AssertionError, CompareError, DereferenceError, ExError, ExErrorKind, Result};
pub use model::{computed, observable, try_computed, Computed, Observable, Value, WrapperCell};
pub use predicates::{is_variant, is_wrapper_cell};
pub use registry::{VariantRegistry, VariantSpec};
pub use render::{format, Inspector};
