//! Core utilities for the t2cast modulator
//!
//! This crate provides the fundamental types used across the stack:
//! - BitBuffer for MSB-first signaling field packing
//! - Typed PHY enums (frame size, code rate, constellations, FFT size, ...)
//! - Configuration error type
//! - Logging setup helpers

pub mod bitbuffer;
pub mod config_error;
pub mod debug;
pub mod types;

// Re-export commonly used items
pub use bitbuffer::BitBuffer;
pub use config_error::ConfigErr;
pub use types::*;
