//! Real-time clock trait

use crate::time::DateTime;

/// Battery-backed wall clock
pub trait Rtc {
    /// Read the current local date and time
    fn datetime(&mut self) -> DateTime;

    /// Set the clock
    fn set_datetime(&mut self, datetime: &DateTime);
}
