//! Structured logging using **tracing**.
//!
//! The core only emits events; installing a subscriber is up to the
//! binary. Traversal trace lines go to the `spreadgraph::trace` target at
//! debug level.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber, writing to stderr.
///
/// Call once at program start. `RUST_LOG` wins when set; otherwise
/// `default_directive` is used (e.g. `"warn"` or `"spreadgraph=debug"`).
/// With `json` the output is one JSON object per event.
pub fn init_structured_logging(json: bool, default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_ansi(false)
            .with_level(true)
            .with_target(true)
            .with_current_span(true)
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_level(true)
            .with_target(true)
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Default filter directive for the given verbosity.
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "warn,spreadgraph=debug,spreadgraph_core=debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_parses() {
        for debug in [false, true] {
            assert!(EnvFilter::try_new(default_directive(debug)).is_ok());
        }
    }
}
