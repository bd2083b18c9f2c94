//! Core utilities for the visualization sandbox.
//!
//! This crate provides foundational types and utilities used across the sandbox:
//! - Error types and result aliases
//! - Logging initialization
//! - Timer utilities
//! - Configuration snapshots

mod config;
mod error;
mod logging;
mod timer;

pub use config::{CameraConfig, EngineConfig, TrackballConfig};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use timer::Timer;
