//! Monotonic time source

/// Milliseconds since an arbitrary epoch, never decreasing
pub trait Clock {
    fn now_ms(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
