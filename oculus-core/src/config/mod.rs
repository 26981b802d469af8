//! Configuration types and parsing
//!
//! Animation tuning is read from a small TOML file embedded in the firmware
//! image. Missing keys keep their defaults.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ConfigError};
pub use types::AnimatorConfig;
