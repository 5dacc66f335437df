//! Build script for qrclock-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates clock.toml at compile time

use std::collections::HashSet;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIO lines wired to the CYW43 radio on the Pico W
const RADIO_PINS: [i64; 4] = [23, 24, 25, 29];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    if env::var("TARGET").is_ok_and(|t| t.starts_with("thumbv6m")) {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate clock.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: clock.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds clock.toml as its configuration.            ║\n\
            ║  Please create one in the qrclock-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read clock.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in clock.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_ranges(&config, &mut errors);
    validate_pins(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid clock configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=clock.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn integer(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn check_range(config: &toml::Value, section: &str, key: &str, min: i64, max: i64, errors: &mut Vec<String>) {
    if let Some(value) = integer(config, section, key) {
        if value < min || value > max {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
    }
}

fn validate_ranges(config: &toml::Value, errors: &mut Vec<String>) {
    check_range(config, "display", "brightness", 0, 7, errors);
    check_range(config, "display", "bit_delay_us", 0, 1000, errors);
    check_range(config, "rotary", "debounce_depth", 1, 64, errors);
    check_range(config, "rotary", "poll_interval_us", 1, 100_000, errors);
    check_range(config, "rtc", "delay_us", 0, 1000, errors);
    check_range(config, "clock", "utc_offset_minutes", -1439, 1439, errors);
    check_range(config, "clock", "refresh_interval_ms", 1, 60_000, errors);
    check_range(config, "ntp", "port", 1, 65535, errors);
    check_range(config, "ntp", "timeout_ms", 1, 600_000, errors);

    if let Some(mode) = config
        .get("clock")
        .and_then(|c| c.get("start_mode"))
        .and_then(|m| m.as_str())
    {
        if !["qr", "analog", "digital"].contains(&mode) {
            errors.push("[clock] start_mode must be 'qr', 'analog' or 'digital'".to_string());
        }
    }
}

/// Parse "gpioN" or "^gpioN"
fn pin_number(value: &toml::Value) -> Option<i64> {
    let s = value.as_str()?;
    let s = s.strip_prefix('^').unwrap_or(s);
    s.strip_prefix("gpio")?.parse().ok()
}

fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    let mut pins: Vec<(String, &toml::Value)> = Vec::new();
    let single = [
        ("display", "clk_pin"),
        ("rotary", "a_pin"),
        ("rotary", "b_pin"),
        ("rotary", "push_pin"),
        ("rtc", "clk_pin"),
        ("rtc", "dio_pin"),
        ("rtc", "ce_pin"),
    ];
    for (section, key) in single {
        if let Some(value) = config.get(section).and_then(|s| s.get(key)) {
            pins.push((format!("[{}] {}", section, key), value));
        }
    }

    match config.get("display").and_then(|d| d.get("data_pins")) {
        Some(toml::Value::Array(items)) => {
            if items.len() != 16 {
                errors.push("[display] data_pins must list exactly 16 pins".to_string());
            }
            for (i, item) in items.iter().enumerate() {
                pins.push((format!("[display] data_pins[{}]", i), item));
            }
        }
        Some(_) => errors.push("[display] data_pins must be an array".to_string()),
        None => {}
    }

    let mut seen = HashSet::new();
    for (name, value) in pins {
        match pin_number(value) {
            Some(pin) if !(0..30).contains(&pin) => {
                errors.push(format!("{} gpio{} out of range", name, pin));
            }
            Some(pin) if RADIO_PINS.contains(&pin) => {
                errors.push(format!("{} gpio{} is used by the radio", name, pin));
            }
            Some(pin) => {
                if !seen.insert(pin) {
                    errors.push(format!("{} gpio{} assigned twice", name, pin));
                }
            }
            None => errors.push(format!("{} must look like \"gpioN\"", name)),
        }
    }
}
