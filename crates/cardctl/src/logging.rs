//! Tracing setup for cardctl
//!
//! Logs go to stderr so stdout only carries command output.

use tracing_subscriber::EnvFilter;

/// Filter directive for a run: RUST_LOG wins, then `-v`, then config
pub fn filter_directive(config_level: &str, verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log.filter(|s| !s.trim().is_empty()) {
        Some(env) => env.to_string(),
        None if verbose => "debug".to_string(),
        None => config_level.to_string(),
    }
}

pub fn init(config_level: &str, verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(config_level, verbose, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (e.g. in tests) is not an error worth reporting
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
