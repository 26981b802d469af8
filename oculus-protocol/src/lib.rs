//! Eye Display Command Protocol
//!
//! This crate defines the text commands the controller sends to the serial
//! image display. The display keeps every eye frame pre-rendered in its own
//! flash; the controller only names a flash address, or pushes a line of
//! subtitle text.
//!
//! # Protocol Overview
//!
//! Every command is a single ASCII line terminated by `\r\n`:
//! ```text
//! FSIMG(<address>,20,20,200,200,0);      draw image slot at (20,20), 200x200
//! SET_TXT(1,'<text>');                   replace subtitle text box 1
//! ```
//!
//! Delivery is fire-and-forget; the display never acknowledges. A separate
//! line-oriented control channel ([`control`]) lets a host drive the mood.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod control;
pub mod image;
pub mod subtitle;
pub mod transcode;

pub use control::{
    ControlError, ControlLine, ControlRequest, LineAssembler, MoodName, MAX_CONTROL_LINE,
};
pub use image::{encode_image, FrameId, ImageCommand, IMAGE_BASE_ADDRESS, IMAGE_STRIDE};
pub use subtitle::{
    encode_subtitle, SubtitleCommand, SubtitleError, MAX_INPUT_LEN, MAX_SUBTITLE_COMMAND_LEN,
    MAX_TRANSCODED_LEN,
};
pub use transcode::{AsciiFallback, TranscodeError, Transcoder, Utf8Passthrough};

/// Line terminator appended to every command
pub const LINE_END: &str = "\r\n";
