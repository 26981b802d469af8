//! Image slot addressing for eye frames
//!
//! Frames are stored back to back in the display's flash, each slot
//! `IMAGE_STRIDE` bytes long, starting at `IMAGE_BASE_ADDRESS`:
//!
//! ```text
//! address = IMAGE_BASE_ADDRESS + frame_id * IMAGE_STRIDE
//! FSIMG(<address>,20,20,200,200,0);\r\n
//! ```

use core::fmt::Write;

use heapless::String;

use crate::LINE_END;

/// Flash address of frame 0
pub const IMAGE_BASE_ADDRESS: u32 = 2_212_352;

/// Bytes between consecutive frame slots
pub const IMAGE_STRIDE: u32 = 80_000;

/// Draw position and size on the panel (pixels)
pub const IMAGE_X: u16 = 20;
pub const IMAGE_Y: u16 = 20;
pub const IMAGE_WIDTH: u16 = 200;
pub const IMAGE_HEIGHT: u16 = 200;

/// Blend mode argument (0 = opaque)
pub const IMAGE_MODE: u8 = 0;

/// Capacity of an encoded image command
///
/// The longest command (frame 255) is 34 bytes.
pub const MAX_IMAGE_COMMAND_LEN: usize = 48;

/// An encoded `FSIMG` command line
pub type ImageCommand = String<MAX_IMAGE_COMMAND_LEN>;

/// Identifier of a pre-rendered eye frame
///
/// Frame ids are `u8`, so the computed flash address always fits in `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameId(pub u8);

impl FrameId {
    /// Flash address of this frame's image slot
    pub const fn address(self) -> u32 {
        IMAGE_BASE_ADDRESS + self.0 as u32 * IMAGE_STRIDE
    }
}

impl From<u8> for FrameId {
    fn from(id: u8) -> Self {
        FrameId(id)
    }
}

/// Encode the command that shows `frame` on the eye panel
pub fn encode_image(frame: FrameId) -> ImageCommand {
    let mut cmd = ImageCommand::new();
    // Cannot fail: the longest command is well under capacity
    let _ = write!(
        cmd,
        "FSIMG({},{},{},{},{},{});{}",
        frame.address(),
        IMAGE_X,
        IMAGE_Y,
        IMAGE_WIDTH,
        IMAGE_HEIGHT,
        IMAGE_MODE,
        LINE_END
    );
    cmd
}
