//! Board-agnostic core logic for the QR clock firmware
//!
//! This crate contains all logic that does not depend on specific
//! hardware implementations, so it can be tested on the host:
//!
//! - Display composition (logical matrix, font, address map, physical frame)
//! - Rotary encoder input (debounce, quadrature decoding, event latching)
//! - Date/time handling and the SNTP packet codec
//! - Clock application state machine and screen renderers
//! - Configuration types and the embedded TOML parser
//! - Collaborator traits (display bus, RTC, time sync, QR encoder)

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod display;
pub mod input;
pub mod time;
pub mod traits;
