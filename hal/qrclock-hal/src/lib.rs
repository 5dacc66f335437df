//! QR Clock Hardware Abstraction Layer
//!
//! This crate defines the minimal hardware capabilities the clock needs:
//! individual digital lines and short busy-wait delays. Chip-specific HALs
//! implement them, and host tests implement them with recording mocks so the
//! bit-banged bus protocols can be verified without hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (qrclock-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  qrclock-drivers (TM1640, DS1302, ...)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  qrclock-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  qrclock-hal-rp2040                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::FlexPin`] - Digital I/O
//! - [`delay::DelayUs`] - Bus timing delays

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use delay::DelayUs;
pub use gpio::{FlexPin, InputPin, OutputPin};
