//! Latched events shared between producers and the clock task

use portable_atomic::{AtomicBool, AtomicI8, Ordering};

/// Pending rotation and press, cleared only by the consumer
///
/// A new non-zero rotation replaces an unconsumed one instead of adding
/// to it, so the consumer sees at most one step per read.
#[derive(Debug)]
pub struct PendingEvents {
    rotation: AtomicI8,
    press: AtomicBool,
}

impl PendingEvents {
    pub const fn new() -> Self {
        Self {
            rotation: AtomicI8::new(0),
            press: AtomicBool::new(false),
        }
    }

    /// Latch a rotation step; zero leaves the pending value alone
    pub fn latch_rotation(&self, delta: i8) {
        if delta != 0 {
            self.rotation.store(delta.signum(), Ordering::Release);
        }
    }

    pub fn latch_press(&self) {
        self.press.store(true, Ordering::Release);
    }

    /// Pending rotation without clearing it
    pub fn rotation(&self) -> i8 {
        self.rotation.load(Ordering::Acquire)
    }

    /// Pending press without clearing it
    pub fn pressed(&self) -> bool {
        self.press.load(Ordering::Acquire)
    }

    /// Take the pending rotation, leaving zero
    pub fn take_rotation(&self) -> i8 {
        self.rotation.swap(0, Ordering::AcqRel)
    }

    /// Take the pending press, leaving it cleared
    pub fn take_press(&self) -> bool {
        self.press.swap(false, Ordering::AcqRel)
    }
}

impl Default for PendingEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen refresh request set by the periodic timer
#[derive(Debug)]
pub struct RefreshFlag(AtomicBool);

impl RefreshFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Take the request, leaving it cleared
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Default for RefreshFlag {
    fn default() -> Self {
        Self::new()
    }
}
