//! Subscriber setup
//!
//! Logs always go to stderr: stdout belongs to JSON results and summaries.
//! The filter comes from `PKGDIFF_LOG`, then `RUST_LOG`, then the profile's
//! default directive.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "PKGDIFF_LOG";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, debug and up
    Development,
    /// One JSON object per event, info and up
    Production,
    /// No output; assertions go through `init_test_capture()`
    Test,
}

impl Profile {
    /// Profile for a command-line run, chosen by its `--log-json` flag.
    pub fn for_cli(log_json: bool) -> Self {
        if log_json {
            Profile::Production
        } else {
            Profile::Development
        }
    }

    /// Directive used when neither environment variable is set.
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "pkgdiff=debug",
            Profile::Production => "pkgdiff=info",
            Profile::Test => "off",
        }
    }

    fn env_filter(self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`.
///
/// Only the first call in a process has any effect. A subscriber installed
/// earlier by someone else (a test capture layer, an embedding application)
/// is left in place.
///
/// ```
/// use pkgdiff_core::logging_facility::{init, Profile};
///
/// init(Profile::for_cli(false));
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(profile.env_filter())
                .try_init()
                .is_ok(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(profile.env_filter())
                .try_init()
                .is_ok(),
            Profile::Test => tracing_subscriber::registry().try_init().is_ok(),
        };
        if !installed {
            tracing::debug!(?profile, "global subscriber already set, keeping it");
        }
    });
}
