//! Configuration type definitions

use oculus_protocol::FrameId;

use crate::pools::DEFAULT_CLOSED_FRAME;

/// Animation timing and frame assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimatorConfig {
    /// Frame shown while forced shut
    pub closed_frame: FrameId,
    /// Re-check interval while forced shut (ms, non-zero)
    pub forced_closed_poll_ms: u32,
    /// Per-frame hold of the drowsy blink (ms)
    pub relaxed_blink_hold_ms: u32,
    /// Per-frame hold of the fast blink (ms)
    pub active_blink_hold_ms: u32,
    /// Pause between the two wake blinks (ms)
    pub wake_blink_gap_ms: u32,
    /// Pause after the wake blinks (ms)
    pub wake_settle_ms: u32,
    /// Delay before the first blink after boot (ms)
    pub initial_blink_interval_ms: u32,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            closed_frame: DEFAULT_CLOSED_FRAME,
            forced_closed_poll_ms: 500,
            relaxed_blink_hold_ms: 200,
            active_blink_hold_ms: 35,
            wake_blink_gap_ms: 100,
            wake_settle_ms: 200,
            initial_blink_interval_ms: 3000,
        }
    }
}
