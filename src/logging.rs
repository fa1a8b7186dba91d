//! Tracing subscriber setup for the binary.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a stderr fmt subscriber if none is set yet.
///
/// `filter` takes precedence over `RUST_LOG`. Returns true if a subscriber was
/// installed by this call, false if one already existed.
pub fn init_tracing(filter: Option<&str>) -> bool {
    let env_filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
