//! Blocking delay backed by the embassy time driver

use embassy_time::{block_for, Duration};
use qrclock_hal::DelayUs;

/// Spins on the system timer; never yields to the executor
#[derive(Debug, Clone, Copy, Default)]
pub struct BusyDelay;

impl DelayUs for BusyDelay {
    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(u64::from(us)));
    }
}
