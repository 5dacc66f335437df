//! DS1302 real-time clock
//!
//! Three-wire interface: CE frames a transfer, bytes are shifted LSB
//! first, and the data line is shared by both directions. A transfer is
//! a command byte (register address, bit 0 set for reads) followed by
//! one data byte.
//!
//! Calendar registers hold BCD. The year register stores two digits,
//! so only 2000-2099 survive a round trip.

use qrclock_core::time::DateTime;
use qrclock_core::traits::Rtc;
use qrclock_hal::{DelayUs, FlexPin, OutputPin};

/// Default pause between line transitions
pub const DEFAULT_DELAY_US: u32 = 1;

/// Year represented by a stored `00`
pub const BASE_YEAR: u16 = 2000;

/// Register addresses (write form; reads set bit 0)
pub mod reg {
    pub const SECONDS: u8 = 0x80;
    pub const MINUTES: u8 = 0x82;
    pub const HOURS: u8 = 0x84;
    pub const DATE: u8 = 0x86;
    pub const MONTH: u8 = 0x88;
    pub const WEEKDAY: u8 = 0x8A;
    pub const YEAR: u8 = 0x8C;
    pub const WRITE_PROTECT: u8 = 0x8E;
    pub const TRICKLE_CHARGE: u8 = 0x90;

    pub const READ: u8 = 0x01;
}

/// Seconds register bit that stops the oscillator
pub const CLOCK_HALT: u8 = 0x80;

/// Trickle charger: one diode, 2 kΩ
pub const TRICKLE_ONE_DIODE_2K: u8 = 0xA5;

/// Decode a packed BCD byte
pub const fn bcd_to_bin(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

/// Encode 0-99 as packed BCD
pub const fn bin_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// DS1302 driver
pub struct Ds1302<CLK, DIO, CE, D> {
    clk: CLK,
    dio: DIO,
    ce: CE,
    delay: D,
    delay_us: u32,
}

impl<CLK, DIO, CE, D> Ds1302<CLK, DIO, CE, D>
where
    CLK: OutputPin,
    DIO: FlexPin,
    CE: OutputPin,
    D: DelayUs,
{
    pub fn new(clk: CLK, dio: DIO, ce: CE, delay: D, delay_us: u32) -> Self {
        Self {
            clk,
            dio,
            ce,
            delay,
            delay_us,
        }
    }

    /// Put the bus in its idle state
    pub fn init(&mut self) {
        self.clk.set_low();
        self.dio.set_as_input();
        self.ce.set_low();
    }

    /// Whether the oscillator is stopped (fresh chip or lost backup power)
    pub fn is_halted(&mut self) -> bool {
        self.read_register(reg::SECONDS) & CLOCK_HALT != 0
    }

    pub fn read_register(&mut self, address: u8) -> u8 {
        self.ce.set_high();
        self.pause();
        self.write_byte(address | reg::READ);
        let value = self.read_byte();
        self.ce.set_low();
        self.pause();
        value
    }

    pub fn write_register(&mut self, address: u8, value: u8) {
        self.ce.set_high();
        self.pause();
        self.write_byte(address);
        self.write_byte(value);
        self.ce.set_low();
        self.pause();
    }

    #[inline]
    fn pause(&mut self) {
        self.delay.delay_us(self.delay_us);
    }

    /// Shift out one byte; leaves the data line released and the clock
    /// low, which also presents the first bit of a read
    fn write_byte(&mut self, byte: u8) {
        self.dio.set_as_output();
        for i in 0..8 {
            self.clk.set_low();
            self.pause();
            self.dio.set_state((byte >> i) & 1 != 0);
            self.pause();
            self.clk.set_high();
            self.pause();
        }
        self.dio.set_as_input();
        self.clk.set_low();
        self.pause();
    }

    fn read_byte(&mut self) -> u8 {
        let mut value = 0;
        for i in 0..8 {
            if self.dio.is_high() {
                value |= 1 << i;
            }
            self.pause();
            self.clk.set_high();
            self.pause();
            self.clk.set_low();
            self.pause();
        }
        value
    }

    fn read_bcd(&mut self, address: u8, mask: u8) -> u8 {
        bcd_to_bin(self.read_register(address) & mask)
    }
}

impl<CLK, DIO, CE, D> Rtc for Ds1302<CLK, DIO, CE, D>
where
    CLK: OutputPin,
    DIO: FlexPin,
    CE: OutputPin,
    D: DelayUs,
{
    fn datetime(&mut self) -> DateTime {
        let second = self.read_bcd(reg::SECONDS, 0x7F);
        let minute = self.read_bcd(reg::MINUTES, 0x7F);
        let hour = self.read_bcd(reg::HOURS, 0x3F);
        let day = self.read_bcd(reg::DATE, 0x3F);
        let month = self.read_bcd(reg::MONTH, 0x1F);
        // Chip counts weekdays 1-7 starting on Sunday
        let weekday = self.read_bcd(reg::WEEKDAY, 0x07).saturating_sub(1) % 7;
        let year = BASE_YEAR + u16::from(self.read_bcd(reg::YEAR, 0xFF));

        DateTime {
            year,
            month,
            day,
            weekday,
            hour,
            minute,
            second,
        }
    }

    fn set_datetime(&mut self, datetime: &DateTime) {
        // Clearing the seconds register also clears the halt bit
        self.write_register(reg::WRITE_PROTECT, 0x00);
        self.write_register(reg::SECONDS, bin_to_bcd(datetime.second));
        self.write_register(reg::MINUTES, bin_to_bcd(datetime.minute));
        self.write_register(reg::HOURS, bin_to_bcd(datetime.hour));
        self.write_register(reg::DATE, bin_to_bcd(datetime.day));
        self.write_register(reg::MONTH, bin_to_bcd(datetime.month));
        self.write_register(reg::WEEKDAY, bin_to_bcd(datetime.weekday % 7 + 1));
        self.write_register(reg::YEAR, bin_to_bcd((datetime.year % 100) as u8));
        self.write_register(reg::TRICKLE_CHARGE, TRICKLE_ONE_DIODE_2K);
    }
}
