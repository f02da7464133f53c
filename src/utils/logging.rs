use tracing_subscriber::{fmt, EnvFilter};

use crate::error::SkinAgeError;

/// init_tracing installs a global fmt subscriber.
///
/// `RUST_LOG` takes precedence; `env_filter` (trace|debug|info|warn|error|off)
/// is used when it is unset or unparsable.
pub fn init_tracing(env_filter: &str) -> Result<(), SkinAgeError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| SkinAgeError::Logging(e.to_string()))
}
