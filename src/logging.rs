// 📜 Logging - tracing subscriber for the binary
//
// RUST_LOG takes precedence over the configured filter. Output goes to stderr
// so listings on stdout can be piped.

use std::env;
use std::io;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the global subscriber using `config.log_filter`.
///
/// Returns false when a subscriber was already installed, e.g. by a host
/// application or an earlier call.
pub fn init(config: &Config) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(config))
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .try_init()
        .is_ok()
}

fn filter_for(config: &Config) -> EnvFilter {
    match env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(&config.log_filter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_refused() {
        let config = Config::new().with_log_filter("warn");
        init(&config);
        assert!(!init(&config));
        tracing::info!("still logging after a second init");
    }
}
