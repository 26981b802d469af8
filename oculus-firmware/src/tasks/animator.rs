//! Eye animation task

use defmt::*;
use embassy_rp::clocks::RoscRng;
use embassy_time::Delay;

use oculus_core::{Animator, Iteration};

use crate::transport::{ChannelTransport, EmbassyClock};

/// Animator wired to the embassy collaborators
pub type EyeAnimator = Animator<'static, ChannelTransport, EmbassyClock, Delay, RoscRng>;

/// Eye animator task - runs the scheduler forever
#[embassy_executor::task]
pub async fn eye_animator_task(mut animator: EyeAnimator) {
    info!("Eye animator task started");

    let mut was_closed = false;

    loop {
        match animator.step().await {
            Iteration::ForcedClosed => {
                if !was_closed {
                    debug!("Eyes held shut");
                    was_closed = true;
                }
            }
            Iteration::Animated {
                mood,
                woke,
                blinked,
                frame,
                dwell_ms,
            } => {
                if was_closed {
                    debug!("Eyes reopened");
                    was_closed = false;
                }
                if woke {
                    debug!("Wake reaction played");
                }
                trace!(
                    "{:?}: blink={} frame={} dwell={}ms",
                    mood,
                    blinked,
                    frame.0,
                    dwell_ms
                );
            }
        }
    }
}
