//! Tracing subscriber setup for the benchmark binary.
//!
//! `RUST_LOG` wins when it parses. Otherwise the level is `info`, or `debug`
//! with `verbose`, which also enables the per-failure search trace.

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or invalid.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "bitqueens=debug,info" } else { "info" }
}

pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Installs the global fmt subscriber on stderr. Returns `false` if one was already set.
pub fn init_tracing(verbose: bool) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_levels() {
        assert_eq!(default_directive(false), "info");
        assert!(default_directive(true).contains("debug"));
    }

    #[test]
    fn test_second_init_is_rejected() {
        let _ = init_tracing(false);
        assert!(!init_tracing(true));
    }
}
