//! Host control lines
//!
//! The dialogue controller drives the eyes over a line-oriented ASCII link.
//! One request per line, keyword first, case-insensitive:
//!
//! ```text
//! MOOD listening      set mood (idle, closed, listening, thinking, speaking)
//! CLOSE               force the eyes shut
//! OPEN                release the override, back to idle
//! SUB Hello there     show subtitle text (rest of line, verbatim)
//! ```

use heapless::Vec;

/// Longest accepted control line, terminator excluded
pub const MAX_CONTROL_LINE: usize = 1024;

/// Mood names accepted on the control link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoodName {
    Idle,
    Closed,
    Listening,
    Thinking,
    Speaking,
}

impl MoodName {
    /// Parse a mood keyword
    pub fn from_keyword(word: &str) -> Option<Self> {
        const NAMES: [(&str, MoodName); 5] = [
            ("idle", MoodName::Idle),
            ("closed", MoodName::Closed),
            ("listening", MoodName::Listening),
            ("thinking", MoodName::Thinking),
            ("speaking", MoodName::Speaking),
        ];

        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(word))
            .map(|&(_, mood)| mood)
    }
}

/// Errors from parsing a control line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// Blank line
    Empty,
    /// Line is not valid UTF-8
    InvalidUtf8,
    /// Line exceeds `MAX_CONTROL_LINE`
    LineTooLong,
    /// Keyword not recognized
    UnknownCommand,
    /// `MOOD` without a recognized mood name
    UnknownMood,
}

/// A request received from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlRequest<'a> {
    /// Change the mood
    Mood(MoodName),
    /// Engage the force-closed override
    Close,
    /// Release the override
    Open,
    /// Show subtitle text
    Subtitle(&'a str),
}

impl<'a> ControlRequest<'a> {
    /// Parse one line (without its `\n`; a trailing `\r` is tolerated)
    pub fn parse(line: &'a str) -> Result<Self, ControlError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.len() > MAX_CONTROL_LINE {
            return Err(ControlError::LineTooLong);
        }

        let trimmed = line.trim_start();
        if trimmed.trim_end().is_empty() {
            return Err(ControlError::Empty);
        }

        let (keyword, rest) = match trimmed.split_once(' ') {
            Some((keyword, rest)) => (keyword, rest),
            None => (trimmed.trim_end(), ""),
        };

        if keyword.eq_ignore_ascii_case("SUB") {
            // Subtitle text is kept verbatim, including inner spacing
            return Ok(ControlRequest::Subtitle(rest));
        }
        if keyword.eq_ignore_ascii_case("CLOSE") {
            return Ok(ControlRequest::Close);
        }
        if keyword.eq_ignore_ascii_case("OPEN") {
            return Ok(ControlRequest::Open);
        }
        if keyword.eq_ignore_ascii_case("MOOD") {
            return MoodName::from_keyword(rest.trim())
                .map(ControlRequest::Mood)
                .ok_or(ControlError::UnknownMood);
        }

        Err(ControlError::UnknownCommand)
    }

    /// Parse a raw line received from the UART
    pub fn parse_bytes(line: &'a [u8]) -> Result<Self, ControlError> {
        let text = core::str::from_utf8(line).map_err(|_| ControlError::InvalidUtf8)?;
        Self::parse(text)
    }
}

/// A complete control line, terminator stripped
pub type ControlLine = Vec<u8, MAX_CONTROL_LINE>;

/// Collects UART bytes into newline-terminated lines
///
/// A line longer than `MAX_CONTROL_LINE` is discarded up to its newline and
/// reported once as [`ControlError::LineTooLong`].
#[derive(Debug, Default)]
pub struct LineAssembler {
    buffer: ControlLine,
    overflowed: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a newline completes a line, `Ok(None)`
    /// when more bytes are needed.
    pub fn feed(&mut self, byte: u8) -> Result<Option<ControlLine>, ControlError> {
        if byte == b'\n' {
            let line = core::mem::take(&mut self.buffer);
            if core::mem::take(&mut self.overflowed) {
                return Err(ControlError::LineTooLong);
            }
            return Ok(Some(line));
        }

        if !self.overflowed && self.buffer.push(byte).is_err() {
            self.overflowed = true;
            self.buffer.clear();
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(
        assembler: &mut LineAssembler,
        bytes: &[u8],
    ) -> Vec<Result<ControlLine, ControlError>, 4> {
        let mut out = Vec::new();
        for &byte in bytes {
            match assembler.feed(byte) {
                Ok(Some(line)) => out.push(Ok(line)).unwrap(),
                Ok(None) => {}
                Err(e) => out.push(Err(e)).unwrap(),
            }
        }
        out
    }

    #[test]
    fn test_assembler_splits_lines() {
        let mut assembler = LineAssembler::new();
        let lines = feed_all(&mut assembler, b"OPEN\r\nMOOD idle\npartial");

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].as_deref(), Ok(&b"OPEN\r"[..]));
        assert_eq!(lines[1].as_deref(), Ok(&b"MOOD idle"[..]));

        let rest = feed_all(&mut assembler, b"\n");
        assert_eq!(rest[0].as_deref(), Ok(&b"partial"[..]));
    }

    #[test]
    fn test_assembler_discards_overlong_line() {
        let mut assembler = LineAssembler::new();
        let mut long = [b'x'; MAX_CONTROL_LINE + 10];
        long[MAX_CONTROL_LINE + 9] = b'\n';

        let lines = feed_all(&mut assembler, &long);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], Err(ControlError::LineTooLong));

        // Recovers on the next line
        let lines = feed_all(&mut assembler, b"CLOSE\n");
        assert_eq!(
            ControlRequest::parse_bytes(lines[0].as_ref().unwrap()),
            Ok(ControlRequest::Close)
        );
    }

    #[test]
    fn test_parse_mood() {
        assert_eq!(
            ControlRequest::parse("MOOD listening"),
            Ok(ControlRequest::Mood(MoodName::Listening))
        );
        assert_eq!(
            ControlRequest::parse("mood Thinking\r"),
            Ok(ControlRequest::Mood(MoodName::Thinking))
        );
        assert_eq!(
            ControlRequest::parse("MOOD   closed  "),
            Ok(ControlRequest::Mood(MoodName::Closed))
        );
    }

    #[test]
    fn test_parse_unknown_mood() {
        assert_eq!(
            ControlRequest::parse("MOOD sleepy"),
            Err(ControlError::UnknownMood)
        );
        assert_eq!(ControlRequest::parse("MOOD"), Err(ControlError::UnknownMood));
    }

    #[test]
    fn test_parse_force_commands() {
        assert_eq!(ControlRequest::parse("CLOSE"), Ok(ControlRequest::Close));
        assert_eq!(ControlRequest::parse("open\r"), Ok(ControlRequest::Open));
        assert_eq!(ControlRequest::parse("  Open  "), Ok(ControlRequest::Open));
    }

    #[test]
    fn test_parse_subtitle_keeps_text_verbatim() {
        assert_eq!(
            ControlRequest::parse("SUB  It's  spaced "),
            Ok(ControlRequest::Subtitle(" It's  spaced "))
        );
        assert_eq!(ControlRequest::parse("SUB"), Ok(ControlRequest::Subtitle("")));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(ControlRequest::parse(""), Err(ControlError::Empty));
        assert_eq!(ControlRequest::parse("  \r"), Err(ControlError::Empty));
        assert_eq!(
            ControlRequest::parse("BLINK"),
            Err(ControlError::UnknownCommand)
        );
        assert_eq!(
            ControlRequest::parse_bytes(&[b'S', b'U', b'B', b' ', 0xFF]),
            Err(ControlError::InvalidUtf8)
        );
    }

    #[test]
    fn test_parse_line_too_long() {
        let line = "SUB ".to_string() + &"x".repeat(MAX_CONTROL_LINE);
        assert_eq!(ControlRequest::parse(&line), Err(ControlError::LineTooLong));
    }
}
