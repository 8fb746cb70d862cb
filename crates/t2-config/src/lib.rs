//! t2cast configuration management
//!
//! This crate provides configuration loading and parsing for the modulator:
//! - TOML configuration file parsing
//! - Modulator configuration structures

pub mod modulator_config;
pub mod toml_config;

pub use modulator_config::*;
pub use toml_config::*;
