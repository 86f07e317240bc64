//! Host time adapter.
//!
//! Implements `embedded_hal::delay::DelayNs` by parking the control thread.
//! Every wait the controller performs goes through this type in production
//! and through a recording fake in tests.

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

#[derive(Debug, Default, Clone, Copy)]
pub struct HostDelay;

impl HostDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayNs for HostDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
