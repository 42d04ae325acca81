//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, `artifex=debug`
    Development,
    /// JSON structured output, `artifex=info`
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Parse the `[logging] profile` config value
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Profile::Development),
            "production" | "prod" => Some(Profile::Production),
            "test" => Some(Profile::Test),
            _ => None,
        }
    }

    fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "artifex=debug",
            Profile::Production => "artifex=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Safe to call more than once; only the first call installs a subscriber.
/// `RUST_LOG` overrides the profile's default filter. Output goes to stderr
/// so CLI stdout stays machine-readable.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));
        // try_init: a host process may already own the global subscriber
        let _ = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .finish()
                .try_init(),
            // Test capture is installed separately via init_test_capture()
            Profile::Test => Ok(()),
        };
    });
}
