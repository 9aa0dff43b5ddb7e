//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding an `EnvFilter` directive that overrides the default.
pub const LOG_ENV: &str = "HOSTCAP_LOG";

/// Installs a stderr `fmt` subscriber filtered by [`LOG_ENV`] or `default_directive`.
///
/// Returns `false` if a global subscriber was already installed, which makes
/// repeated calls from tests harmless.
pub fn init(default_directive: &str) -> bool {
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
		.try_init()
		.is_ok()
}
