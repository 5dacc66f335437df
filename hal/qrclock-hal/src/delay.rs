//! Blocking delay abstraction
//!
//! Bus protocols in this firmware are bit-banged and need short, fixed
//! pauses between line transitions. These are busy-waits: the caller never
//! yields while a transfer is in progress.

/// Microsecond busy-wait delay
pub trait DelayUs {
    /// Pause for at least `us` microseconds
    fn delay_us(&mut self, us: u32);
}

impl<T: DelayUs + ?Sized> DelayUs for &mut T {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us);
    }
}
