//! Subscriber installation
//!
//! The engine never installs a subscriber on its own; a host calls
//! [`init`] once, or tests call
//! [`init_test_capture`](super::test_capture::init_test_capture).

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output shape and default verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable, operation boundaries visible
    Development,
    /// JSON lines, errors and warnings only from the engine
    Production,
    /// No output; pair with `init_test_capture()`
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "deepeq=debug",
            Profile::Production => "deepeq=info",
            Profile::Test => "off",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the subscriber for `profile`; later calls are no-ops
///
/// `RUST_LOG` replaces the profile's directive, e.g.
/// `RUST_LOG=deepeq_core::conversion=trace` to watch conversion-table misses.
///
/// ```
/// use deepeq_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// init(Profile::Production); // ignored
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => tracing_subscriber::fmt().with_env_filter(profile.filter()).init(),
        Profile::Production => tracing_subscriber::fmt()
            .json()
            .with_env_filter(profile.filter())
            .init(),
        Profile::Test => tracing_subscriber::registry().init(),
    });
}
