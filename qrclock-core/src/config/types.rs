//! Configuration type definitions
//!
//! Defaults describe the reference board: a Pico W with the panel clock
//! on GPIO16, the encoder on GPIO20-22 and a DS1302 on GPIO17-19.

use heapless::String;

use crate::clock::Mode;
use crate::display::CHANNEL_COUNT;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// GPIO pins usable on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Maximum NTP server host name length
pub const MAX_HOST_LEN: usize = 64;

/// Maximum Wi-Fi SSID length
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length
pub const MAX_PASSWORD_LEN: usize = 64;

/// GPIO lines wired to the CYW43 radio on the Pico W
pub const RADIO_PINS: [u8; 4] = [23, 24, 25, 29];

/// Highest display brightness step
pub const MAX_BRIGHTNESS: u8 = 7;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Value has the wrong type or format
    InvalidValue,
    /// Pin string is not "gpioN" with N < 30
    InvalidPin,
    /// String longer than its buffer
    TooLong,
    /// Data pin list does not have exactly 16 entries
    WrongPinCount,
    /// Brightness above 7
    BrightnessOutOfRange,
    /// Debounce depth not in 1..=64
    InvalidDebounceDepth,
    /// Zero interval or timeout
    InvalidInterval,
    /// UTC offset beyond ±24 h
    InvalidUtcOffset,
    /// The same GPIO is assigned twice
    PinConflict(u8),
    /// GPIO belongs to the radio
    ReservedPin(u8),
}

/// GPIO pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self { pin, pull_up: true }
    }

    /// Parse `"gpioN"`, optionally prefixed with `^` for a pull-up
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        let (s, pull_up) = match s.strip_prefix('^') {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        let number = s.strip_prefix("gpio").ok_or(ConfigError::InvalidPin)?;
        let pin: u8 = number.parse().map_err(|_| ConfigError::InvalidPin)?;
        if pin >= GPIO_COUNT {
            return Err(ConfigError::InvalidPin);
        }

        Ok(Self { pin, pull_up })
    }
}

/// LED panel bus
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Shared clock line
    pub clk_pin: PinConfig,
    /// Data line per chip, indexed by channel
    pub data_pins: [PinConfig; CHANNEL_COUNT],
    /// Brightness step (0-7)
    pub brightness: u8,
    /// Half-period of the bus clock in microseconds
    pub bit_delay_us: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        const DATA: [u8; CHANNEL_COUNT] = [3, 2, 1, 0, 7, 6, 5, 4, 11, 10, 9, 8, 15, 14, 13, 12];
        Self {
            clk_pin: PinConfig::new(16),
            data_pins: DATA.map(PinConfig::new),
            brightness: MAX_BRIGHTNESS,
            bit_delay_us: 10,
        }
    }
}

/// Rotary encoder with push switch
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotaryConfig {
    pub a_pin: PinConfig,
    pub b_pin: PinConfig,
    pub push_pin: PinConfig,
    /// Samples that must agree before a level change (1-64)
    pub debounce_depth: u8,
    /// Sampling period in microseconds
    ///
    /// The debounce window lasts `debounce_depth × poll_interval_us`; it
    /// must stay well below the time a detent holds each phase state.
    pub poll_interval_us: u32,
}

impl Default for RotaryConfig {
    fn default() -> Self {
        Self {
            a_pin: PinConfig::with_pullup(20),
            b_pin: PinConfig::with_pullup(21),
            push_pin: PinConfig::with_pullup(22),
            debounce_depth: 64,
            poll_interval_us: 50,
        }
    }
}

/// DS1302 real-time clock
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RtcConfig {
    pub clk_pin: PinConfig,
    pub dio_pin: PinConfig,
    pub ce_pin: PinConfig,
    /// Bus settle delay in microseconds
    pub delay_us: u32,
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self {
            clk_pin: PinConfig::new(17),
            dio_pin: PinConfig::new(18),
            ce_pin: PinConfig::new(19),
            delay_us: 1,
        }
    }
}

/// Clock behaviour
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockSettings {
    /// Fixed offset from UTC applied to network time
    pub utc_offset_minutes: i32,
    /// Screen refresh period outside the menu
    pub refresh_interval_ms: u32,
    /// Screen shown after power-on
    pub start_mode: Mode,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 9 * 60,
            refresh_interval_ms: 1000,
            start_mode: Mode::Qr,
        }
    }
}

/// SNTP server
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NtpConfig {
    pub server: String<MAX_HOST_LEN>,
    pub port: u16,
    /// Upper bound for join + lookup + exchange
    pub timeout_ms: u32,
}

impl Default for NtpConfig {
    fn default() -> Self {
        let mut server = String::new();
        // Fits MAX_HOST_LEN
        let _ = server.push_str("pool.ntp.org");
        Self {
            server,
            port: crate::time::sntp::NTP_PORT,
            timeout_ms: 10_000,
        }
    }
}

/// Wi-Fi station credentials
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WifiConfig {
    pub ssid: String<MAX_SSID_LEN>,
    pub password: String<MAX_PASSWORD_LEN>,
}

impl WifiConfig {
    /// Whether credentials were provided
    pub fn is_configured(&self) -> bool {
        !self.ssid.is_empty()
    }
}

/// Complete clock configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    pub display: DisplayConfig,
    pub rotary: RotaryConfig,
    pub rtc: RtcConfig,
    pub clock: ClockSettings,
    pub ntp: NtpConfig,
    pub wifi: WifiConfig,
}

impl ClockConfig {
    /// Configuration of the reference board
    pub fn new() -> Self {
        Self::default()
    }

    /// Every assigned GPIO, in claim order
    pub fn pins(&self) -> impl Iterator<Item = PinConfig> + '_ {
        core::iter::once(self.display.clk_pin)
            .chain(self.display.data_pins.iter().copied())
            .chain([self.rotary.a_pin, self.rotary.b_pin, self.rotary.push_pin])
            .chain([self.rtc.clk_pin, self.rtc.dio_pin, self.rtc.ce_pin])
    }

    /// Check ranges and pin assignment
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.brightness > MAX_BRIGHTNESS {
            return Err(ConfigError::BrightnessOutOfRange);
        }
        if self.rotary.debounce_depth == 0
            || self.rotary.debounce_depth > crate::input::debounce::MAX_DEPTH
        {
            return Err(ConfigError::InvalidDebounceDepth);
        }
        if self.rotary.poll_interval_us == 0
            || self.clock.refresh_interval_ms == 0
            || self.ntp.timeout_ms == 0
        {
            return Err(ConfigError::InvalidInterval);
        }
        if self.clock.utc_offset_minutes.unsigned_abs() >= 24 * 60 {
            return Err(ConfigError::InvalidUtcOffset);
        }

        let mut used: u32 = 0;
        for pin in self.pins() {
            if pin.pin >= GPIO_COUNT {
                return Err(ConfigError::InvalidPin);
            }
            if RADIO_PINS.contains(&pin.pin) {
                return Err(ConfigError::ReservedPin(pin.pin));
            }
            let mask = 1u32 << pin.pin;
            if used & mask != 0 {
                return Err(ConfigError::PinConflict(pin.pin));
            }
            used |= mask;
        }

        Ok(())
    }
}
