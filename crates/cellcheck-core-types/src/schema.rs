//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_COMPARISON_ID: &str = "comparison_id";

// Comparison details
pub const FIELD_VARIANT: &str = "variant";
pub const FIELD_OUTCOME: &str = "outcome";
pub const FIELD_MISMATCH_COUNT: &str = "mismatch_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Outcome labels
pub const OUTCOME_EQUAL: &str = "equal";
pub const OUTCOME_NOT_EQUAL: &str = "not_equal";
