//! Command transport to the display

/// Fire-and-forget byte sink
///
/// Implementations queue the bytes for transmission and return without
/// waiting for the wire. Failures are the transport's concern; callers get
/// no acknowledgement.
pub trait Transport {
    /// Queue one complete command line
    fn send(&self, bytes: &[u8]);
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, bytes: &[u8]) {
        (**self).send(bytes)
    }
}
