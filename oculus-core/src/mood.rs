//! Mood model
//!
//! The mood decides animation style: which idle pool is sampled, which blink
//! variant plays, and how long each frame dwells.

use oculus_protocol::MoodName;
use rand_core::RngCore;

/// Externally driven activity state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mood {
    /// Relaxed, half-open eyes
    #[default]
    Idle,
    /// Eyes held shut
    ForcedClosed,
    /// Attentive, slow gaze changes
    Listening,
    /// Rapid darting, like searching memory
    Thinking,
    /// Lively gaze while talking
    Speaking,
}

// Atomic storage values
const MOOD_IDLE: u8 = 0;
const MOOD_FORCED_CLOSED: u8 = 1;
const MOOD_LISTENING: u8 = 2;
const MOOD_THINKING: u8 = 3;
const MOOD_SPEAKING: u8 = 4;

impl Mood {
    /// Decode from the atomic storage value
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            MOOD_IDLE => Some(Mood::Idle),
            MOOD_FORCED_CLOSED => Some(Mood::ForcedClosed),
            MOOD_LISTENING => Some(Mood::Listening),
            MOOD_THINKING => Some(Mood::Thinking),
            MOOD_SPEAKING => Some(Mood::Speaking),
            _ => None,
        }
    }

    /// Encode for atomic storage
    pub const fn to_byte(self) -> u8 {
        match self {
            Mood::Idle => MOOD_IDLE,
            Mood::ForcedClosed => MOOD_FORCED_CLOSED,
            Mood::Listening => MOOD_LISTENING,
            Mood::Thinking => MOOD_THINKING,
            Mood::Speaking => MOOD_SPEAKING,
        }
    }

    /// Relaxed moods use the lazy blink and the half-open idle pool
    pub const fn is_relaxed(self) -> bool {
        matches!(self, Mood::Idle)
    }

    /// Time between blinks
    pub const fn blink_interval_range(self) -> MsRange {
        if self.is_relaxed() {
            MsRange::new(3000, 8000)
        } else {
            MsRange::new(2000, 6000)
        }
    }

    /// How long an idle frame stays up before the next one
    pub const fn dwell_range(self) -> MsRange {
        match self {
            Mood::Listening => MsRange::new(800, 1500),
            Mood::Speaking => MsRange::new(150, 400),
            Mood::Thinking => MsRange::new(50, 150),
            Mood::Idle => MsRange::new(2000, 4000),
            Mood::ForcedClosed => MsRange::new(500, 1200),
        }
    }
}

impl From<MoodName> for Mood {
    fn from(name: MoodName) -> Self {
        match name {
            MoodName::Idle => Mood::Idle,
            MoodName::Closed => Mood::ForcedClosed,
            MoodName::Listening => Mood::Listening,
            MoodName::Thinking => Mood::Thinking,
            MoodName::Speaking => Mood::Speaking,
        }
    }
}

/// Closed millisecond interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MsRange {
    pub min: u32,
    pub max: u32,
}

impl MsRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Draw a uniform integer from the interval
    pub fn sample<R: RngCore>(&self, rng: &mut R) -> u32 {
        let span = self.max - self.min + 1;
        self.min + rng.next_u32() % span
    }

    /// Check if `ms` lies in the interval
    pub const fn contains(&self, ms: u32) -> bool {
        ms >= self.min && ms <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRng;
    use proptest::prelude::*;

    #[test]
    fn test_byte_roundtrip() {
        for mood in [
            Mood::Idle,
            Mood::ForcedClosed,
            Mood::Listening,
            Mood::Thinking,
            Mood::Speaking,
        ] {
            assert_eq!(Mood::from_byte(mood.to_byte()), Some(mood));
        }
        assert_eq!(Mood::from_byte(0xFF), None);
    }

    #[test]
    fn test_blink_intervals() {
        assert_eq!(Mood::Idle.blink_interval_range(), MsRange::new(3000, 8000));
        assert_eq!(Mood::Listening.blink_interval_range(), MsRange::new(2000, 6000));
        assert_eq!(Mood::Thinking.blink_interval_range(), MsRange::new(2000, 6000));
    }

    #[test]
    fn test_dwell_ranges() {
        assert_eq!(Mood::Listening.dwell_range(), MsRange::new(800, 1500));
        assert_eq!(Mood::Speaking.dwell_range(), MsRange::new(150, 400));
        assert_eq!(Mood::Thinking.dwell_range(), MsRange::new(50, 150));
        assert_eq!(Mood::Idle.dwell_range(), MsRange::new(2000, 4000));
        assert_eq!(Mood::ForcedClosed.dwell_range(), MsRange::new(500, 1200));
    }

    #[test]
    fn test_sample_covers_both_ends() {
        let range = MsRange::new(50, 150);
        // 0 maps to min, span - 1 maps to max, span wraps back to min
        let mut rng = ScriptedRng::new(&[0, 100, 101]);
        assert_eq!(range.sample(&mut rng), 50);
        assert_eq!(range.sample(&mut rng), 150);
        assert_eq!(range.sample(&mut rng), 50);
    }

    #[test]
    fn test_sample_stays_in_range() {
        let range = MsRange::new(3000, 8000);
        let mut rng = ScriptedRng::new(&[u32::MAX, 12345, 5000, 5001]);
        for _ in 0..4 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }

    #[test]
    fn test_from_mood_name() {
        assert_eq!(Mood::from(MoodName::Closed), Mood::ForcedClosed);
        assert_eq!(Mood::from(MoodName::Speaking), Mood::Speaking);
    }

    proptest! {
        #[test]
        fn prop_sample_within_bounds(
            min in 0u32..100_000,
            width in 0u32..100_000,
            draws in proptest::collection::vec(any::<u32>(), 1..16),
        ) {
            let range = MsRange::new(min, min + width);
            let mut rng = ScriptedRng::new(&draws);
            for _ in 0..draws.len() {
                prop_assert!(range.contains(range.sample(&mut rng)));
            }
        }
    }
}
