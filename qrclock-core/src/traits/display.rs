//! Display bus trait

use crate::display::PhysicalFrame;

/// Sink for complete physical frames
///
/// Implemented by the TM1640 chain driver. A write has no error path:
/// the bus is write-only and a torn frame is replaced by the next one.
/// Brightness is fixed when the driver is built.
pub trait DisplayDriver {
    /// Shift a full frame out to every chip
    fn write_frame(&mut self, frame: &PhysicalFrame);
}
