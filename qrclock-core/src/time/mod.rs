//! Calendar time and the SNTP packet codec

pub mod datetime;
pub mod sntp;

pub use datetime::{DateTime, DateTimeError};
pub use sntp::SntpError;
