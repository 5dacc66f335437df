//! GPIO pin abstractions
//!
//! Provides traits for digital input and output lines that can be implemented
//! by chip-specific HALs.

/// Digital output line
///
/// Implementations drive the physical line for the specific chip.
pub trait OutputPin {
    /// Set the line high (logic 1)
    fn set_high(&mut self);

    /// Set the line low (logic 0)
    fn set_low(&mut self);

    /// Set the line to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the line is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the line is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input line
pub trait InputPin {
    /// Check if the line reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the line reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Bidirectional line
///
/// Half-duplex buses (the DS1302 data line) drive the line while sending
/// and release it to read the device's reply.
pub trait FlexPin: OutputPin + InputPin {
    /// Release the line and read from it
    fn set_as_input(&mut self);

    /// Drive the line
    fn set_as_output(&mut self);
}
