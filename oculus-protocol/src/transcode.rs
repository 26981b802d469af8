//! Text re-encoding for the display's native character set
//!
//! Subtitle text arrives as UTF-8. Displays with a CJK font usually expect
//! GB2312 or GBK instead; the conversion table lives outside this crate and
//! is plugged in through [`Transcoder`].

/// Errors reported by a transcoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TranscodeError {
    /// Encoded output does not fit the caller's buffer
    BufferTooSmall,
}

/// Converts UTF-8 text into the display's native encoding
pub trait Transcoder {
    /// Encode `input` into `output`
    ///
    /// Returns the number of bytes written. Implementations must never write
    /// past `output.len()`; if the encoded text does not fit they return
    /// [`TranscodeError::BufferTooSmall`].
    fn transcode(&self, input: &str, output: &mut [u8]) -> Result<usize, TranscodeError>;
}

impl<T: Transcoder + ?Sized> Transcoder for &T {
    fn transcode(&self, input: &str, output: &mut [u8]) -> Result<usize, TranscodeError> {
        (**self).transcode(input, output)
    }
}

/// For displays configured for UTF-8: bytes are copied unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Passthrough;

impl Transcoder for Utf8Passthrough {
    fn transcode(&self, input: &str, output: &mut [u8]) -> Result<usize, TranscodeError> {
        let bytes = input.as_bytes();
        let dest = output
            .get_mut(..bytes.len())
            .ok_or(TranscodeError::BufferTooSmall)?;
        dest.copy_from_slice(bytes);
        Ok(bytes.len())
    }
}

/// For ASCII-only fonts: every non-ASCII character becomes `?`
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiFallback;

impl Transcoder for AsciiFallback {
    fn transcode(&self, input: &str, output: &mut [u8]) -> Result<usize, TranscodeError> {
        let mut len = 0;
        for ch in input.chars() {
            let slot = output.get_mut(len).ok_or(TranscodeError::BufferTooSmall)?;
            *slot = if ch.is_ascii() { ch as u8 } else { b'?' };
            len += 1;
        }
        Ok(len)
    }
}
