//! Cinescroll Common Utilities
//!
//! Shared infrastructure for all Cinescroll crates:
//! - Error types and result aliases
//! - Frame clock for the single render loop
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
