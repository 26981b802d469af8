//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels or the
//! shared eye state.

pub mod animator;
pub mod control_rx;
pub mod display_tx;

pub use animator::eye_animator_task;
pub use control_rx::{control_rx_task, EyeFacade};
pub use display_tx::display_tx_task;
