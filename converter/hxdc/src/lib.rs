//! hxd driver library.
//!
//! The `hxd` binary and these commands are the only I/O actors in the
//! workspace: they enumerate Haxe sources, run the scan/render core and
//! write `.d.ts` files to package-derived paths. The core crates never
//! touch the file system or the console.

use std::sync::Once;

pub mod commands;
pub mod error;

pub use error::DriverError;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for progress output.
///
/// Call this once at startup; safe to call multiple times. `verbose`
/// enables info-level logging on its own; otherwise output follows
/// `RUST_LOG` (e.g. `RUST_LOG=hxdc=debug`).
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(false).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        } else if verbose {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(false).with_level(true))
                .with(EnvFilter::new("hxdc=info"))
                .init();
        }
    });
}
