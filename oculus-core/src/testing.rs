//! Host test doubles: scripted randomness, simulated time, recording transport

use std::cell::{Cell, RefCell};
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;
use oculus_protocol::{FrameId, IMAGE_BASE_ADDRESS, IMAGE_STRIDE};
use rand_core::{impls, Error, RngCore};

use crate::traits::{Clock, Transport};

/// Replays a fixed list of values, cycling; an empty script always yields 0
pub struct ScriptedRng {
    values: Vec<u32>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }

    pub fn zeros() -> Self {
        Self::new(&[])
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Simulated time; delays advance it instantly
#[derive(Default)]
pub struct SimTime {
    now_ms: Cell<u64>,
    delays: RefCell<Vec<u32>>,
}

impl SimTime {
    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }

    pub fn delays(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }

    pub fn clear(&self) {
        self.delays.borrow_mut().clear();
    }

    pub fn delay(&self) -> SimDelay<'_> {
        SimDelay(self)
    }
}

impl Clock for SimTime {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

pub struct SimDelay<'a>(&'a SimTime);

impl DelayNs for SimDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000).await
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.delays.borrow_mut().push(ms);
        self.0.advance(ms as u64);
    }
}

/// Simulated delay that runs a hook before each wait
///
/// The hook gets the 1-based number of the delay about to start, so a test
/// can change shared state at a chosen point inside an iteration.
pub struct HookedDelay<'a, F> {
    inner: SimDelay<'a>,
    count: usize,
    hook: F,
}

impl<'a, F: FnMut(usize)> HookedDelay<'a, F> {
    pub fn new(time: &'a SimTime, hook: F) -> Self {
        Self {
            inner: time.delay(),
            count: 0,
            hook,
        }
    }
}

impl<F: FnMut(usize)> DelayNs for HookedDelay<'_, F> {
    async fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000).await
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.count += 1;
        (self.hook)(self.count);
        self.inner.delay_ms(ms).await
    }
}

/// Records every command sent
#[derive(Default)]
pub struct Recorder {
    sent: RefCell<Vec<Vec<u8>>>,
}

impl Recorder {
    pub fn commands(&self) -> Vec<Vec<u8>> {
        self.sent.borrow().clone()
    }

    /// Frame ids of all image commands, in send order
    pub fn frames(&self) -> Vec<FrameId> {
        self.sent
            .borrow()
            .iter()
            .filter_map(|cmd| {
                let text = core::str::from_utf8(cmd).ok()?;
                let address: u32 = text
                    .strip_prefix("FSIMG(")?
                    .split(',')
                    .next()?
                    .parse()
                    .ok()?;
                Some(FrameId(((address - IMAGE_BASE_ADDRESS) / IMAGE_STRIDE) as u8))
            })
            .collect()
    }

    pub fn clear(&self) {
        self.sent.borrow_mut().clear();
    }
}

impl Transport for Recorder {
    fn send(&self, bytes: &[u8]) {
        self.sent.borrow_mut().push(bytes.to_vec());
    }
}
