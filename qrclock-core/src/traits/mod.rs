//! Collaborator traits
//!
//! These traits define the interface between the clock logic and the
//! hardware or library specific implementations.

pub mod display;
pub mod rtc;
pub mod symbol;
pub mod time_sync;

pub use display::DisplayDriver;
pub use rtc::Rtc;
pub use symbol::SymbolEncoder;
pub use time_sync::TimeSync;
