//! Tracing setup for the sandbox binary.
//!
//! Frame-level events (`viz::draw`, per-frame renderer traces) sit at
//! `trace`, so the default filter keeps them off while still showing scene
//! switches and navigation changes from the `viz` crates at `debug`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub(crate) const DEFAULT_FILTER: &str = "info,viz=debug,winit=warn";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default `info,viz=debug,winit=warn`, and
/// `RUST_LOG=viz::draw=trace` shows every stand-in mesh draw. Call once,
/// before the event loop starts.
///
/// ```no_run
/// viz_core::init_logging();
/// tracing::info!("Starting visualization sandbox");
/// ```
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .init();
}
