//! RP2040-specific HAL for the QR clock
//!
//! Implements the `qrclock-hal` traits on top of `embassy-rp`:
//!
//! - Config-driven pin claiming by GPIO number
//! - Output, input and bidirectional line wrappers
//! - Busy-wait microsecond delay for the bit-banged buses

#![no_std]

pub mod delay;
pub mod gpio;
pub mod pins;

pub use delay::BusyDelay;
pub use gpio::{RpFlex, RpInput, RpOutput};
pub use pins::{PinBank, PinError, RadioPeripherals};
