//! Shared eye state
//!
//! Written by caller contexts through the facade, read by the animation
//! loop at iteration boundaries. Every field is an atomic, so no lock is
//! held across the loop's sleeps.
//!
//! The mood and the wake latch share one byte so the loop can take both in
//! a single atomic operation: it never sees a new mood without the wake
//! that came with it.

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use crate::mood::Mood;

/// Low bits of the mood cell hold the mood discriminant
const MOOD_MASK: u8 = 0x0F;

/// High bit of the mood cell is the wake latch
const WAKE_BIT: u8 = 0x80;

/// Mood, force-closed override and wake latch
#[derive(Debug)]
pub struct EyeState {
    mood: AtomicU8,
    force_closed: AtomicBool,
}

impl Default for EyeState {
    fn default() -> Self {
        Self::new()
    }
}

impl EyeState {
    /// Start relaxed, open, no wake pending
    pub const fn new() -> Self {
        Self {
            mood: AtomicU8::new(Mood::Idle.to_byte()),
            force_closed: AtomicBool::new(false),
        }
    }

    /// Current mood
    pub fn mood(&self) -> Mood {
        decode_mood(self.mood.load(Ordering::Acquire))
    }

    /// Replace the mood
    ///
    /// An Idle to Listening edge latches the wake reaction. The latch holds
    /// at most one pending wake and is published together with the mood.
    pub fn set_mood(&self, mood: Mood) {
        // The closure always returns Some, so the update cannot fail
        let _ = self
            .mood
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                let edge = decode_mood(current) == Mood::Idle && mood == Mood::Listening;
                let wake = if edge { WAKE_BIT } else { current & WAKE_BIT };
                Some(mood.to_byte() | wake)
            });
    }

    /// Check if the force-closed override is engaged
    pub fn is_force_closed(&self) -> bool {
        self.force_closed.load(Ordering::Acquire)
    }

    /// Engage or release the force-closed override
    pub fn set_force_closed(&self, closed: bool) {
        self.force_closed.store(closed, Ordering::Release);
    }

    /// Check if a wake reaction is waiting
    pub fn wake_pending(&self) -> bool {
        self.mood.load(Ordering::Acquire) & WAKE_BIT != 0
    }

    /// Consume the wake latch, returning whether it was set
    pub fn take_wake(&self) -> bool {
        self.take_snapshot().1
    }

    /// Consume the wake latch and read the mood in one step
    ///
    /// Returns the mood and whether a wake reaction was pending.
    pub fn take_snapshot(&self) -> (Mood, bool) {
        let previous = self.mood.fetch_and(!WAKE_BIT, Ordering::AcqRel);
        (decode_mood(previous), previous & WAKE_BIT != 0)
    }

    /// Eyes must stay shut this iteration
    pub fn eyes_shut(&self) -> bool {
        self.is_force_closed() || self.mood() == Mood::ForcedClosed
    }
}

fn decode_mood(cell: u8) -> Mood {
    Mood::from_byte(cell & MOOD_MASK).unwrap_or_default()
}
