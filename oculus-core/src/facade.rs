//! Display state facade
//!
//! The boundary the rest of the firmware talks to. Mood and force-close
//! requests are filtered here and forwarded to the shared [`EyeState`];
//! subtitles bypass the animator and go straight to the transport.
//!
//! While forced shut, every mood request except `ForcedClosed` is dropped
//! without error so a higher-level "close" intent is not fought by routine
//! mood updates.

use oculus_protocol::{encode_subtitle, SubtitleError, Transcoder};
use portable_atomic::{AtomicBool, Ordering};

use crate::mood::Mood;
use crate::state::EyeState;
use crate::traits::Transport;

/// Mood and override control plus subtitle output
pub struct DisplayFacade<'a, T, X> {
    state: &'a EyeState,
    force_closed: AtomicBool,
    transport: T,
    transcoder: X,
}

impl<'a, T: Transport, X: Transcoder> DisplayFacade<'a, T, X> {
    pub fn new(state: &'a EyeState, transport: T, transcoder: X) -> Self {
        Self {
            state,
            force_closed: AtomicBool::new(false),
            transport,
            transcoder,
        }
    }

    /// Request a mood change
    ///
    /// Returns `false` if the request was dropped by the override.
    pub fn set_mood(&self, mood: Mood) -> bool {
        if self.is_force_closed() && mood != Mood::ForcedClosed {
            return false;
        }
        self.state.set_mood(mood);
        true
    }

    /// Shut the eyes until [`force_open`](Self::force_open)
    pub fn force_close(&self) {
        self.force_closed.store(true, Ordering::Release);
        self.state.set_force_closed(true);
    }

    /// Release the override and return to Idle
    ///
    /// The mood is reset even if something else was requested last.
    pub fn force_open(&self) {
        // Idle first so nothing sees the old mood with the override gone
        self.state.set_mood(Mood::Idle);
        self.force_closed.store(false, Ordering::Release);
        self.state.set_force_closed(false);
    }

    pub fn is_force_closed(&self) -> bool {
        self.force_closed.load(Ordering::Acquire)
    }

    /// Current mood as seen by the animator
    pub fn mood(&self) -> Mood {
        self.state.mood()
    }

    /// Encode and send subtitle text
    pub fn send_subtitle(&self, text: &str) -> Result<(), SubtitleError> {
        let cmd = encode_subtitle(text, &self.transcoder)?;
        self.transport.send(&cmd);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Recorder;
    use oculus_protocol::{TranscodeError, Utf8Passthrough};

    #[test]
    fn test_set_mood_forwards() {
        let state = EyeState::new();
        let display = Recorder::default();
        let facade = DisplayFacade::new(&state, &display, Utf8Passthrough);

        assert!(facade.set_mood(Mood::Speaking));
        assert_eq!(state.mood(), Mood::Speaking);
    }

    #[test]
    fn test_mood_ignored_while_forced_closed() {
        let state = EyeState::new();
        let display = Recorder::default();
        let facade = DisplayFacade::new(&state, &display, Utf8Passthrough);

        facade.force_close();
        assert!(state.is_force_closed());

        assert!(!facade.set_mood(Mood::Listening));
        assert_eq!(state.mood(), Mood::Idle);
        assert!(!state.wake_pending());

        assert!(facade.set_mood(Mood::ForcedClosed));
        assert_eq!(state.mood(), Mood::ForcedClosed);
    }

    #[test]
    fn test_force_open_resets_to_idle() {
        let state = EyeState::new();
        let display = Recorder::default();
        let facade = DisplayFacade::new(&state, &display, Utf8Passthrough);

        facade.set_mood(Mood::Thinking);
        facade.force_close();
        facade.force_open();

        assert!(!facade.is_force_closed());
        assert!(!state.is_force_closed());
        assert_eq!(facade.mood(), Mood::Idle);
    }

    #[test]
    fn test_override_released_only_after_idle_is_visible() {
        let state = EyeState::new();
        let display = Recorder::default();
        let facade = DisplayFacade::new(&state, &display, Utf8Passthrough);

        for _ in 0..200 {
            facade.set_mood(Mood::Thinking);
            facade.force_close();

            std::thread::scope(|s| {
                s.spawn(|| {
                    while state.is_force_closed() {
                        core::hint::spin_loop();
                    }
                    assert_eq!(state.mood(), Mood::Idle);
                });
                facade.force_open();
            });
        }
    }

    #[test]
    fn test_force_open_without_close_still_resets() {
        let state = EyeState::new();
        let display = Recorder::default();
        let facade = DisplayFacade::new(&state, &display, Utf8Passthrough);

        facade.set_mood(Mood::Thinking);
        facade.force_open();
        assert_eq!(state.mood(), Mood::Idle);
    }

    #[test]
    fn test_subtitle_goes_to_transport() {
        let state = EyeState::new();
        let display = Recorder::default();
        let facade = DisplayFacade::new(&state, &display, Utf8Passthrough);

        facade.send_subtitle("It's \"done\"\nready").unwrap();
        assert_eq!(
            display.commands(),
            [b"SET_TXT(1,'It\"s \"done\" ready');\r\n".to_vec()]
        );
    }

    #[test]
    fn test_subtitle_sent_while_forced_closed() {
        let state = EyeState::new();
        let display = Recorder::default();
        let facade = DisplayFacade::new(&state, &display, Utf8Passthrough);

        facade.force_close();
        facade.send_subtitle("still talking").unwrap();
        assert_eq!(display.commands().len(), 1);
    }

    #[test]
    fn test_subtitle_bound_violation_sends_nothing() {
        struct Overflowing;

        impl Transcoder for Overflowing {
            fn transcode(&self, _: &str, _: &mut [u8]) -> Result<usize, TranscodeError> {
                Err(TranscodeError::BufferTooSmall)
            }
        }

        let state = EyeState::new();
        let display = Recorder::default();
        let facade = DisplayFacade::new(&state, &display, Overflowing);

        assert_eq!(
            facade.send_subtitle("anything"),
            Err(SubtitleError::TranscodeOverflow)
        );
        assert!(display.commands().is_empty());
    }
}
