//! Embedded configuration
//!
//! `clock.toml` is compiled into the image and parsed once at start-up.
//! The build script has already checked it, so falling back to the
//! board defaults only happens when the two validators disagree.

use defmt::*;

use qrclock_core::config::{parse_config, ClockConfig};

/// Edit clock.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../clock.toml");

pub fn load() -> ClockConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            warn!("Using board defaults");
            ClockConfig::default()
        }
    }
}
