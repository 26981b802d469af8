//! Board-agnostic core logic for the eye display firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Mood model and the shared, lock-free eye state
//! - Frame pools and blink sequences
//! - Animation scheduler (blink timing, wake reaction, idle micro-motion)
//! - State facade used by the rest of the firmware
//! - Configuration types and the embedded config parser
//! - Collaborator traits (transport, clock)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod animator;
pub mod config;
pub mod facade;
pub mod mood;
pub mod pools;
pub mod state;
pub mod traits;

#[cfg(test)]
mod testing;

pub use animator::{Animator, BlinkTimer, Iteration};
pub use config::{AnimatorConfig, ConfigError};
pub use facade::DisplayFacade;
pub use mood::{Mood, MsRange};
pub use state::EyeState;
