//! Collaborator traits
//!
//! These traits define the interface between the animation logic and the
//! board: where command bytes go and where time comes from. Delays use
//! `embedded_hal_async::delay::DelayNs`, randomness uses `rand_core::RngCore`.

pub mod clock;
pub mod transport;

pub use clock::Clock;
pub use oculus_protocol::Transcoder;
pub use transport::Transport;
