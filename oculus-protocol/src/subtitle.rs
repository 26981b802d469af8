//! Subtitle text command encoding
//!
//! Arbitrary caller text is turned into a single bounded command line:
//!
//! 1. Truncate to `MAX_INPUT_LEN` bytes, appending `...` when cut
//! 2. Transcode into the display encoding (at most `MAX_TRANSCODED_LEN` bytes)
//! 3. Sanitize: `'` becomes `"`, CR and LF become spaces, NUL ends the text
//! 4. Wrap as `SET_TXT(1,'<payload>');\r\n`
//!
//! The payload is quoted with single quotes on the wire, so an unescaped
//! quote or line break would end the command early and the display would
//! execute the rest of the text as commands.

use heapless::Vec;

use crate::transcode::Transcoder;

/// Maximum subtitle input kept before truncation (bytes of UTF-8)
pub const MAX_INPUT_LEN: usize = 800;

/// Marker appended to truncated input
pub const TRUNCATION_MARKER: &str = "...";

/// Maximum transcoded payload size
pub const MAX_TRANSCODED_LEN: usize = 1024;

/// Maximum encoded command size
pub const MAX_SUBTITLE_COMMAND_LEN: usize = 1200;

const COMMAND_PREFIX: &[u8] = b"SET_TXT(1,'";
const COMMAND_SUFFIX: &[u8] = b"');\r\n";

// A fully sanitized payload always fits the command buffer
const _: () = assert!(
    COMMAND_PREFIX.len() + MAX_TRANSCODED_LEN + COMMAND_SUFFIX.len() <= MAX_SUBTITLE_COMMAND_LEN
);

/// An encoded `SET_TXT` command line
pub type SubtitleCommand = Vec<u8, MAX_SUBTITLE_COMMAND_LEN>;

/// Errors that can occur while encoding a subtitle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubtitleError {
    /// Transcoded text exceeds `MAX_TRANSCODED_LEN`
    TranscodeOverflow,
    /// Wrapped command exceeds `MAX_SUBTITLE_COMMAND_LEN`
    CommandOverflow,
}

/// Cut `text` to at most `MAX_INPUT_LEN` bytes
///
/// The cut backs off to the previous character boundary so the prefix stays
/// valid UTF-8. Returns the prefix and whether anything was dropped.
pub fn truncate_input(text: &str) -> (&str, bool) {
    if text.len() <= MAX_INPUT_LEN {
        return (text, false);
    }

    let mut end = MAX_INPUT_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    (&text[..end], true)
}

/// Neutralize protocol delimiters in place
///
/// Returns the payload length, which ends at the first NUL byte.
pub fn sanitize(payload: &mut [u8]) -> usize {
    for (i, byte) in payload.iter_mut().enumerate() {
        match *byte {
            0 => return i,
            b'\'' => *byte = b'"',
            b'\r' | b'\n' => *byte = b' ',
            _ => {}
        }
    }
    payload.len()
}

/// Encode `text` as a subtitle command
pub fn encode_subtitle<T: Transcoder>(
    text: &str,
    transcoder: &T,
) -> Result<SubtitleCommand, SubtitleError> {
    let (prefix, truncated) = truncate_input(text);

    let mut buf = [0u8; MAX_TRANSCODED_LEN];
    let mut len = transcoder
        .transcode(prefix, &mut buf)
        .map_err(|_| SubtitleError::TranscodeOverflow)?;
    if truncated {
        len += transcoder
            .transcode(TRUNCATION_MARKER, &mut buf[len..])
            .map_err(|_| SubtitleError::TranscodeOverflow)?;
    }

    let payload_len = sanitize(&mut buf[..len]);

    let mut cmd = SubtitleCommand::new();
    cmd.extend_from_slice(COMMAND_PREFIX)
        .map_err(|_| SubtitleError::CommandOverflow)?;
    cmd.extend_from_slice(&buf[..payload_len])
        .map_err(|_| SubtitleError::CommandOverflow)?;
    cmd.extend_from_slice(COMMAND_SUFFIX)
        .map_err(|_| SubtitleError::CommandOverflow)?;

    Ok(cmd)
}
