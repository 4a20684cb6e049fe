#![forbid(unsafe_code)]

//! Subscriber setup for hosts that do not install their own.
//!
//! Libraries in this workspace only emit `tracing` events. Hosts that already
//! run a subscriber should skip these helpers entirely.

use tracing_subscriber::EnvFilter;

/// Filter variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "WAYFINDER_LOG";

/// Directive used when neither variable is set.
pub const DEFAULT_DIRECTIVE: &str = "wayfinder=info";

/// Raw directives from `WAYFINDER_LOG`, else `RUST_LOG`.
fn directives_from<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(LOG_ENV).or_else(|| lookup("RUST_LOG"))
}

/// Parse `directives`, falling back to [`DEFAULT_DIRECTIVE`] when absent or invalid.
fn filter_from(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

fn env_filter() -> EnvFilter {
    filter_from(directives_from(|key| std::env::var(key).ok()))
}

/// Install a human-readable subscriber.
///
/// Returns `false` if a global subscriber was already set.
pub fn init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Install a JSON-lines subscriber.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> bool {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter())
        .with_current_span(false)
        .try_init()
        .is_ok()
}
