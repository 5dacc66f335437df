//! State shared between tasks
//!
//! Input and timer tasks only latch flags; the clock task consumes them.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use qrclock_core::input::{PendingEvents, RefreshFlag};

/// Rotation and press waiting for the clock task
pub static PENDING_EVENTS: PendingEvents = PendingEvents::new();

/// Set every refresh interval
pub static REFRESH: RefreshFlag = RefreshFlag::new();

/// Wakes the clock task when there is something to service
pub static WAKE: Signal<CriticalSectionRawMutex, ()> = Signal::new();
