//! Subscriber setup for hosts embedding cellcheck
//!
//! cellcheck only emits events. Hosts that have no subscriber of their own
//! call [`init`] once to get comparison start/end/error events on stderr or
//! in the test capture buffer.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use super::test_capture::init_test_capture;

/// Environment variable that overrides the profile's default filter
pub const FILTER_ENV: &str = "CELLCHECK_LOG";

/// Where comparison events go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, variant registrations included
    Development,
    /// One JSON object per event, op boundaries only
    Production,
    /// In-memory capture shared with [`init_test_capture`]
    Test,
}

impl Profile {
    /// Filter used when `CELLCHECK_LOG` is unset or invalid. The test capture
    /// layer is unfiltered, which `trace` reflects.
    pub fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "cellcheck=debug",
            Profile::Production => "cellcheck=info",
            Profile::Test => "trace",
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call in a process has an effect. An already installed
/// global subscriber is left in place.
///
/// ```
/// use cellcheck_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(profile.filter())
                .try_init()
                .ok();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.filter())
                .try_init()
                .ok();
        }
        Profile::Test => {
            // Tests fetch the same handle through init_test_capture()
            init_test_capture();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_op_start;

    #[test]
    fn test_test_profile_installs_capture() {
        init(Profile::Test);
        init(Profile::Test);

        let capture = init_test_capture();
        log_op_start!("init_test_profile_unique_1");
        capture.assert_event_exists("init_test_profile_unique_1", "start");
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(Profile::Development.default_directive(), "cellcheck=debug");
        assert_eq!(Profile::Production.default_directive(), "cellcheck=info");
        assert_ne!(Profile::Development, Profile::Production);
    }
}
