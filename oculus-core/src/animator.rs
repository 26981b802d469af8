//! Eye animation scheduler
//!
//! A single perpetual loop decides which frame the display shows and when.
//! Each iteration:
//!
//! 1. Forced shut: show the closed frame, wait the poll interval, restart
//! 2. Wake reaction: two blinks after an Idle to Listening edge
//! 3. Blink when the randomized interval has elapsed
//! 4. Show one idle frame sampled from the mood's pool
//! 5. Dwell for a mood-dependent random time
//!
//! Shared state is read only at the start of an iteration. Blinks play to
//! completion: a mood change or force-close requested mid-blink is seen
//! once the blink finishes.

use embedded_hal_async::delay::DelayNs;
use oculus_protocol::{encode_image, FrameId};
use rand_core::RngCore;

use crate::config::AnimatorConfig;
use crate::mood::Mood;
use crate::pools::{pick, ACTIVE_BLINKS, ACTIVE_IDLE, RELAXED_BLINK, RELAXED_IDLE};
use crate::state::EyeState;
use crate::traits::{Clock, Transport};

/// What one loop iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Iteration {
    /// Eyes held shut; nothing else ran
    ForcedClosed,
    /// Normal animation step
    Animated {
        /// Mood snapshot the iteration ran with
        mood: Mood,
        /// Wake reaction played
        woke: bool,
        /// Scheduled blink played
        blinked: bool,
        /// Idle frame shown at the end
        frame: FrameId,
        /// Dwell after the idle frame (ms)
        dwell_ms: u32,
    },
}

/// Last blink time and the randomized wait until the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkTimer {
    last_blink_ms: u64,
    interval_ms: u32,
}

impl BlinkTimer {
    pub const fn new(now_ms: u64, interval_ms: u32) -> Self {
        Self {
            last_blink_ms: now_ms,
            interval_ms,
        }
    }

    /// Check if strictly more than the interval has passed
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_blink_ms) > self.interval_ms as u64
    }

    /// Restart the timer
    pub fn reset(&mut self, now_ms: u64, interval_ms: u32) {
        self.last_blink_ms = now_ms;
        self.interval_ms = interval_ms;
    }
}

/// Animation loop over a display transport
///
/// Owns the blink timer; reads mood, override and wake latch from the
/// shared [`EyeState`].
pub struct Animator<'a, T, C, D, R> {
    state: &'a EyeState,
    transport: T,
    clock: C,
    delay: D,
    rng: R,
    config: AnimatorConfig,
    blink: BlinkTimer,
}

impl<'a, T, C, D, R> Animator<'a, T, C, D, R>
where
    T: Transport,
    C: Clock,
    D: DelayNs,
    R: RngCore,
{
    /// Create an animator; the first blink is due after the configured
    /// initial interval
    pub fn new(
        state: &'a EyeState,
        transport: T,
        clock: C,
        delay: D,
        rng: R,
        config: AnimatorConfig,
    ) -> Self {
        let blink = BlinkTimer::new(clock.now_ms(), config.initial_blink_interval_ms);
        Self {
            state,
            transport,
            clock,
            delay,
            rng,
            config,
            blink,
        }
    }

    /// Current blink timer
    pub fn blink_timer(&self) -> BlinkTimer {
        self.blink
    }

    /// Run forever
    pub async fn run(&mut self) -> ! {
        loop {
            self.step().await;
        }
    }

    /// Run one loop iteration
    pub async fn step(&mut self) -> Iteration {
        if self.state.eyes_shut() {
            self.show(self.config.closed_frame);
            self.delay.delay_ms(self.config.forced_closed_poll_ms).await;
            return Iteration::ForcedClosed;
        }

        let (mood, woke) = self.state.take_snapshot();

        if woke {
            self.play_blink(mood).await;
            self.delay.delay_ms(self.config.wake_blink_gap_ms).await;
            self.play_blink(mood).await;
            self.delay.delay_ms(self.config.wake_settle_ms).await;
        }

        let now = self.clock.now_ms();
        let blinked = self.blink.is_due(now);
        if blinked {
            self.play_blink(mood).await;
            let interval = mood.blink_interval_range().sample(&mut self.rng);
            self.blink.reset(now, interval);
        }

        let pool: &[FrameId] = if mood.is_relaxed() {
            &RELAXED_IDLE
        } else {
            &ACTIVE_IDLE
        };
        let frame = *pick(&mut self.rng, pool);
        self.show(frame);

        let dwell_ms = mood.dwell_range().sample(&mut self.rng);
        self.delay.delay_ms(dwell_ms).await;

        Iteration::Animated {
            mood,
            woke,
            blinked,
            frame,
            dwell_ms,
        }
    }

    /// Play one blink cycle to completion
    async fn play_blink(&mut self, mood: Mood) {
        let (sequence, hold_ms): (&[FrameId], u32) = if mood.is_relaxed() {
            (&RELAXED_BLINK[..], self.config.relaxed_blink_hold_ms)
        } else {
            (
                &pick(&mut self.rng, &ACTIVE_BLINKS)[..],
                self.config.active_blink_hold_ms,
            )
        };

        for &frame in sequence {
            self.show(frame);
            self.delay.delay_ms(hold_ms).await;
        }
    }

    fn show(&self, frame: FrameId) {
        self.transport.send(encode_image(frame).as_bytes());
    }
}
