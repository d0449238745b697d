//! Clipsync Common Utilities
//!
//! Shared infrastructure for all clipsync crates:
//! - Error taxonomy and result aliases
//! - Tick limiting and time-unit conversion for playback updates
//! - Tracing/logging initialization
//! - Editor configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
