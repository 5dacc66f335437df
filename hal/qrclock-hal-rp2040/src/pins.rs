//! Claim GPIO pins by number
//!
//! Pin numbers come from `clock.toml`, so the pins are moved into a bank
//! at start-up and handed out on request. The Pico W wires GPIO 23, 24,
//! 25 and 29 to the CYW43 radio; those are split off for the network
//! stack and can never be claimed from the bank.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{DMA_CH0, PIN_23, PIN_24, PIN_25, PIN_29, PIO0};
use embassy_rp::{Peri, Peripherals};
use qrclock_core::config::{PinConfig, GPIO_COUNT, RADIO_PINS};

use crate::gpio::{RpFlex, RpInput, RpOutput};

const BANK_SIZE: usize = GPIO_COUNT as usize;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for the radio
    Reserved,
}

/// Everything the CYW43 driver needs
pub struct RadioPeripherals {
    pub pwr: Peri<'static, PIN_23>,
    pub dio: Peri<'static, PIN_24>,
    pub cs: Peri<'static, PIN_25>,
    pub clk: Peri<'static, PIN_29>,
    pub pio: Peri<'static, PIO0>,
    pub dma: Peri<'static, DMA_CH0>,
}

/// Free GPIO pins, indexed by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; BANK_SIZE],
}

impl PinBank {
    /// Split the peripherals into the pin bank and the radio resources
    pub fn from_peripherals(p: Peripherals) -> (Self, RadioPeripherals) {
        let bank = Self {
            pins: [
                Some(p.PIN_0.into()),
                Some(p.PIN_1.into()),
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                None,
                None,
                None,
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                None,
            ],
        };
        let radio = RadioPeripherals {
            pwr: p.PIN_23,
            dio: p.PIN_24,
            cs: p.PIN_25,
            clk: p.PIN_29,
            pio: p.PIO0,
            dma: p.DMA_CH0,
        };
        (bank, radio)
    }

    /// Take a pin by number
    pub fn take(&mut self, pin: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if RADIO_PINS.contains(&pin) {
            return Err(PinError::Reserved);
        }
        self.pins[usize::from(pin)].take().ok_or(PinError::AlreadyTaken)
    }

    pub fn is_available(&self, pin: u8) -> bool {
        self.pins.get(usize::from(pin)).is_some_and(Option::is_some)
    }

    /// Claim a push-pull output
    pub fn output(&mut self, pin: u8, initial_high: bool) -> Result<RpOutput, PinError> {
        Ok(RpOutput::new(self.take(pin)?, initial_high))
    }

    /// Claim an input, with the pull-up the config asks for
    pub fn input(&mut self, config: PinConfig) -> Result<RpInput, PinError> {
        Ok(RpInput::new(self.take(config.pin)?, config.pull_up))
    }

    /// Claim a bidirectional line
    pub fn flex(&mut self, pin: u8) -> Result<RpFlex, PinError> {
        Ok(RpFlex::new(self.take(pin)?))
    }
}
