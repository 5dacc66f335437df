//! TM1640 LED driver chain
//!
//! Sixteen TM1640 chips share one clock line and each has its own data
//! line, so every clock tick shifts one bit into all chips at once.
//! Each chip drives one 8×8 tile in two colors: its 16 display
//! registers hold 8 rows of plane 0 followed by 8 rows of plane 1.
//!
//! Bus framing (per the TM1640 datasheet):
//!
//! ```text
//! start:  DIN ‾‾\____     stop:  DIN ____/‾‾
//!         CLK ‾‾‾‾\__            CLK __/‾‾‾‾
//! ```
//!
//! Bytes are sent LSB first and sampled on the rising clock edge.

use qrclock_core::display::{PhysicalFrame, CHANNEL_COUNT, PLANE_COUNT, TILE_SIZE};
use qrclock_core::traits::DisplayDriver;
use qrclock_hal::{DelayUs, OutputPin};

/// Default half-period of the bus clock
pub const DEFAULT_BIT_DELAY_US: u32 = 10;

/// Highest brightness step
pub const MAX_BRIGHTNESS: u8 = 7;

/// Command bytes
pub mod cmd {
    /// Data command: write to display registers, auto-increment address
    pub const DATA_WRITE: u8 = 0x40;
    /// Address command: start at register 0
    pub const ADDRESS: u8 = 0xC0;
    /// Display control command, OR'd with [`DISPLAY_ON`] and brightness
    pub const DISPLAY_CONTROL: u8 = 0x80;
    pub const DISPLAY_ON: u8 = 0x08;
}

/// Chain of TM1640 chips on a shared clock
pub struct Tm1640Chain<P, D> {
    clk: P,
    dio: [P; CHANNEL_COUNT],
    delay: D,
    bit_delay_us: u32,
    brightness: u8,
}

impl<P: OutputPin, D: DelayUs> Tm1640Chain<P, D> {
    /// Create a driver; `dio[n]` is the data line of channel `n`
    ///
    /// Brightness is clamped to 0-7. Nothing is sent until
    /// [`init`](Self::init).
    pub fn new(clk: P, dio: [P; CHANNEL_COUNT], delay: D, bit_delay_us: u32, brightness: u8) -> Self {
        Self {
            clk,
            dio,
            delay,
            bit_delay_us,
            brightness: brightness.min(MAX_BRIGHTNESS),
        }
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Idle the bus, load `frame` and switch the display on
    pub fn init(&mut self, frame: &PhysicalFrame) {
        self.clk.set_high();
        self.set_all(true);
        self.write_frame(frame);
        self.write_display_control();
    }

    /// Release the pins and delay
    pub fn release(self) -> (P, [P; CHANNEL_COUNT], D) {
        (self.clk, self.dio, self.delay)
    }

    #[inline]
    fn pause(&mut self) {
        self.delay.delay_us(self.bit_delay_us);
    }

    fn set_all(&mut self, high: bool) {
        for pin in self.dio.iter_mut() {
            pin.set_state(high);
        }
    }

    /// One rising/falling clock pulse after the data lines are set
    fn clock_pulse(&mut self) {
        self.pause();
        self.clk.set_high();
        self.pause();
        self.clk.set_low();
        self.pause();
    }

    fn start(&mut self) {
        self.set_all(false);
        self.pause();
        self.clk.set_low();
        self.pause();
    }

    fn stop(&mut self) {
        self.set_all(false);
        self.pause();
        self.clk.set_high();
        self.pause();
        self.set_all(true);
        self.pause();
    }

    /// Send the same byte to every chip, LSB first
    fn write_byte(&mut self, byte: u8) {
        for i in 0..8 {
            self.set_all((byte >> i) & 1 != 0);
            self.clock_pulse();
        }
    }

    fn write_command(&mut self, byte: u8) {
        self.start();
        self.write_byte(byte);
        self.stop();
    }

    fn write_display_control(&mut self) {
        self.write_command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON | self.brightness);
    }

    /// Shift the 128 payload bits of every channel in parallel
    fn write_payload(&mut self, frame: &PhysicalFrame) {
        for plane in 0..PLANE_COUNT {
            for row in 0..TILE_SIZE {
                for col in 0..TILE_SIZE {
                    let bit = row * TILE_SIZE + col;
                    for (channel, pin) in self.dio.iter_mut().enumerate() {
                        pin.set_state(frame.is_set(channel, plane, bit));
                    }
                    self.clock_pulse();
                }
            }
        }
    }
}

impl<P: OutputPin, D: DelayUs> DisplayDriver for Tm1640Chain<P, D> {
    fn write_frame(&mut self, frame: &PhysicalFrame) {
        self.write_command(cmd::DATA_WRITE);
        self.start();
        self.write_byte(cmd::ADDRESS);
        self.write_payload(frame);
        self.stop();
    }
}
