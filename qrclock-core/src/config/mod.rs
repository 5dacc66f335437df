//! Configuration types and parser
//!
//! The firmware embeds a TOML file describing pin assignment, timing
//! and network settings. It is parsed at start-up by the minimal
//! no_std parser in [`parse`].

pub mod parse;
pub mod types;

pub use parse::parse_config;
pub use types::*;
