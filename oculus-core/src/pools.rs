//! Frame pools and blink sequences
//!
//! Frame ids index the pre-rendered image slots in the display's flash.
//! Blink sequences play in order; idle pools are sampled uniformly.

use oculus_protocol::FrameId;
use rand_core::RngCore;

/// Frame shown while the eyes are forced shut (overridable in config)
pub const DEFAULT_CLOSED_FRAME: FrameId = FrameId(8);

/// Drowsy blink for the relaxed mood
///
/// half-open, nearly closed, closed, fully closed, closed, nearly closed,
/// half-open
pub const RELAXED_BLINK: [FrameId; 7] = [
    FrameId(45),
    FrameId(44),
    FrameId(42),
    FrameId(43),
    FrameId(42),
    FrameId(44),
    FrameId(45),
];

/// Fast blinks for the active moods, one picked at random per blink
pub const ACTIVE_BLINKS: [[FrameId; 6]; 3] = [
    [FrameId(6), FrameId(7), FrameId(8), FrameId(9), FrameId(10), FrameId(11)],
    [FrameId(20), FrameId(21), FrameId(22), FrameId(23), FrameId(24), FrameId(25)],
    [FrameId(31), FrameId(32), FrameId(33), FrameId(34), FrameId(35), FrameId(36)],
];

/// Half-open resting frames for the relaxed mood
pub const RELAXED_IDLE: [FrameId; 2] = [FrameId(44), FrameId(45)];

/// Wide-eyed gaze frames shared by all active moods
pub const ACTIVE_IDLE: [FrameId; 34] = [
    FrameId(0),
    FrameId(1),
    FrameId(2),
    FrameId(3),
    FrameId(4),
    FrameId(5),
    FrameId(12),
    FrameId(13),
    FrameId(14),
    FrameId(15),
    FrameId(16),
    FrameId(17),
    FrameId(18),
    FrameId(19),
    FrameId(26),
    FrameId(27),
    FrameId(28),
    FrameId(29),
    FrameId(30),
    FrameId(37),
    FrameId(38),
    FrameId(39),
    FrameId(48),
    FrameId(49),
    FrameId(50),
    FrameId(51),
    FrameId(52),
    FrameId(53),
    FrameId(54),
    FrameId(55),
    FrameId(56),
    FrameId(57),
    FrameId(58),
    FrameId(59),
];

/// Uniformly pick one element of a non-empty slice
pub fn pick<'a, T, R: RngCore>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.next_u32() as usize % items.len()]
}
