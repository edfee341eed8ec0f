//! Tracing setup for the binary

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Default filter directive when `RUST_LOG` does not mention the crate
pub const DEFAULT_DIRECTIVE: &str = "budgetmate=warn";

/// Install the global `tracing` subscriber once
///
/// Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
/// refines the filter (e.g. `RUST_LOG=budgetmate=debug`).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = match DEFAULT_DIRECTIVE.parse() {
            Ok(directive) if std::env::var_os("RUST_LOG").is_none() => {
                EnvFilter::from_default_env().add_directive(directive)
            }
            _ => EnvFilter::from_default_env(),
        };

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
