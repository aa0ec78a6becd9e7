//! Tracing subscriber setup.

use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,sqlx=warn";

/// Initialize the global subscriber.
/// - Respects `RUST_LOG` if set
/// - `LOG_FORMAT=json` switches to JSON lines, anything else is compact text
/// - Safe to call more than once (later calls are no-ops)
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        let _ = fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .with_writer(io::stdout)
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .with_writer(io::stdout)
            .try_init();
    }
}
