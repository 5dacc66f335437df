//! Hardware driver implementations
//!
//! This crate provides bit-banged drivers for the clock's peripherals,
//! generic over the `qrclock-hal` pin and delay traits:
//!
//! - TM1640 LED driver chain (16 chips on a shared clock line)
//! - DS1302 real-time clock
//! - Rotary encoder sampling

#![no_std]
#![deny(unsafe_code)]

pub mod ds1302;
pub mod rotary;
pub mod tm1640;

pub use ds1302::Ds1302;
pub use rotary::RotaryEncoder;
pub use tm1640::Tm1640Chain;
