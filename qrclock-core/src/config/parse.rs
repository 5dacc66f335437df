//! Simple TOML parser for the clock configuration
//!
//! This is a minimal parser that handles only the subset needed for the
//! clock configuration. It does NOT support the full TOML language.
//!
//! Supported features:
//! - `[section]` headers
//! - Key = value pairs (string, integer, boolean)
//! - Single-line arrays of strings: `data_pins = ["gpio3", "gpio2"]`
//! - Comments (# ...), including after a value
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Escape sequences inside strings
//! - Dotted keys and nested tables

use heapless::String;

use super::types::{ClockConfig, ConfigError, PinConfig};
use crate::clock::Mode;
use crate::display::CHANNEL_COUNT;

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Rotary,
    Rtc,
    Clock,
    Ntp,
    Wifi,
}

/// Parse TOML configuration into a validated [`ClockConfig`]
///
/// Keys that are not present keep their default value.
pub fn parse_config(input: &str) -> Result<ClockConfig, ConfigError> {
    let mut config = ClockConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && !line.contains('=') {
            let header = strip_comment(line);
            let name = header
                .strip_prefix('[')
                .and_then(|h| h.strip_suffix(']'))
                .ok_or(ConfigError::InvalidSection)?;
            section = parse_section_header(name)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidValue)?;
        apply_value(&mut config, section, key, value)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "rotary" => Ok(Section::Rotary),
        "rtc" => Ok(Section::Rtc),
        "clock" => Ok(Section::Clock),
        "ntp" => Ok(Section::Ntp),
        "wifi" => Ok(Section::Wifi),
        _ => Err(ConfigError::InvalidSection),
    }
}

/// Drop a trailing comment that is not inside a string
fn strip_comment(s: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in s.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return s[..i].trim_end(),
            _ => {}
        }
    }
    s
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> Result<&str, ConfigError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else if value.contains('"') {
        Err(ConfigError::InvalidValue)
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

fn parse_heapless<const N: usize>(value: &str) -> Result<String<N>, ConfigError> {
    let s = parse_string(value)?;
    String::try_from(s).map_err(|_| ConfigError::TooLong)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}

fn parse_pin(value: &str) -> Result<PinConfig, ConfigError> {
    PinConfig::parse(parse_string(value)?)
}

fn parse_pin_array(value: &str) -> Result<[PinConfig; CHANNEL_COUNT], ConfigError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ConfigError::InvalidValue)?;

    let mut pins = [PinConfig::new(0); CHANNEL_COUNT];
    let mut count = 0;
    for item in inner.split(',') {
        let item = item.trim();
        // Trailing comma
        if item.is_empty() {
            continue;
        }
        let slot = pins.get_mut(count).ok_or(ConfigError::WrongPinCount)?;
        *slot = parse_pin(item)?;
        count += 1;
    }

    if count != CHANNEL_COUNT {
        return Err(ConfigError::WrongPinCount);
    }
    Ok(pins)
}

fn parse_mode(value: &str) -> Result<Mode, ConfigError> {
    match parse_string(value)? {
        "qr" => Ok(Mode::Qr),
        "analog" => Ok(Mode::Analog),
        "digital" => Ok(Mode::Digital),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn apply_value(
    config: &mut ClockConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    match (section, key) {
        (Section::Display, "clk_pin") => config.display.clk_pin = parse_pin(value)?,
        (Section::Display, "data_pins") => config.display.data_pins = parse_pin_array(value)?,
        (Section::Display, "brightness") => config.display.brightness = parse_int(value)?,
        (Section::Display, "bit_delay_us") => config.display.bit_delay_us = parse_int(value)?,

        (Section::Rotary, "a_pin") => config.rotary.a_pin = parse_pin(value)?,
        (Section::Rotary, "b_pin") => config.rotary.b_pin = parse_pin(value)?,
        (Section::Rotary, "push_pin") => config.rotary.push_pin = parse_pin(value)?,
        (Section::Rotary, "debounce_depth") => config.rotary.debounce_depth = parse_int(value)?,
        (Section::Rotary, "poll_interval_us") => {
            config.rotary.poll_interval_us = parse_int(value)?
        }

        (Section::Rtc, "clk_pin") => config.rtc.clk_pin = parse_pin(value)?,
        (Section::Rtc, "dio_pin") => config.rtc.dio_pin = parse_pin(value)?,
        (Section::Rtc, "ce_pin") => config.rtc.ce_pin = parse_pin(value)?,
        (Section::Rtc, "delay_us") => config.rtc.delay_us = parse_int(value)?,

        (Section::Clock, "utc_offset_minutes") => {
            config.clock.utc_offset_minutes = parse_int(value)?
        }
        (Section::Clock, "refresh_interval_ms") => {
            config.clock.refresh_interval_ms = parse_int(value)?
        }
        (Section::Clock, "start_mode") => config.clock.start_mode = parse_mode(value)?,

        (Section::Ntp, "server") => config.ntp.server = parse_heapless(value)?,
        (Section::Ntp, "port") => config.ntp.port = parse_int(value)?,
        (Section::Ntp, "timeout_ms") => config.ntp.timeout_ms = parse_int(value)?,

        (Section::Wifi, "ssid") => config.wifi.ssid = parse_heapless(value)?,
        (Section::Wifi, "password") => config.wifi.password = parse_heapless(value)?,

        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTILINE_ARRAY: &str = r#"
# Arrays must fit on one line
[display]
clk_pin = "gpio16"
data_pins = ["gpio3", "gpio2", "gpio1", "gpio0", "gpio7", "gpio6", "gpio5", "gpio4",
"#;

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("display"), Ok(Section::Display));
        assert_eq!(parse_section_header(" wifi "), Ok(Section::Wifi));
        assert_eq!(parse_section_header("stepper"), Err(ConfigError::InvalidSection));
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("7 # max"), "7");
        assert_eq!(strip_comment("\"a#b\" # note"), "\"a#b\"");
        assert_eq!(strip_comment("\"a#b\""), "\"a#b\"");
    }

    #[test]
    fn test_parse_pin_array() {
        let value = r#"["gpio3", "gpio2", "gpio1", "gpio0", "gpio7", "gpio6", "gpio5", "gpio4", "gpio11", "gpio10", "gpio9", "gpio8", "gpio15", "gpio14", "gpio13", "gpio12",]"#;
        let pins = parse_pin_array(value).unwrap();
        assert_eq!(pins[0].pin, 3);
        assert_eq!(pins[15].pin, 12);

        assert_eq!(parse_pin_array(r#"["gpio1", "gpio2"]"#), Err(ConfigError::WrongPinCount));
        assert_eq!(parse_pin_array(r#""gpio1""#), Err(ConfigError::InvalidValue));
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config(""), Ok(ClockConfig::default()));
        assert_eq!(parse_config("# only a comment\n\n"), Ok(ClockConfig::default()));
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
[display]
clk_pin = "gpio16"
data_pins = ["gpio3", "gpio2", "gpio1", "gpio0", "gpio7", "gpio6", "gpio5", "gpio4", "gpio11", "gpio10", "gpio9", "gpio8", "gpio15", "gpio14", "gpio13", "gpio12"]
brightness = 4   # dimmer at night
bit_delay_us = 10

[rotary]
a_pin = "^gpio20"
b_pin = "^gpio21"
push_pin = "^gpio22"
debounce_depth = 32
poll_interval_us = 50

[rtc]
clk_pin = "gpio17"
dio_pin = "gpio18"
ce_pin = "gpio19"
delay_us = 2

[clock]
utc_offset_minutes = -300
refresh_interval_ms = 500
start_mode = "digital"

[ntp]
server = "time.example.org"
port = 123
timeout_ms = 8000

[wifi]
ssid = "home"
password = "p#ss word"
"#;
        let config = parse_config(config_str).unwrap();
        assert_eq!(config.display.brightness, 4);
        assert_eq!(config.rotary.debounce_depth, 32);
        assert!(config.rotary.push_pin.pull_up);
        assert_eq!(config.rtc.delay_us, 2);
        assert_eq!(config.clock.utc_offset_minutes, -300);
        assert_eq!(config.clock.start_mode, Mode::Digital);
        assert_eq!(config.ntp.server.as_str(), "time.example.org");
        assert_eq!(config.ntp.timeout_ms, 8000);
        assert_eq!(config.wifi.ssid.as_str(), "home");
        assert_eq!(config.wifi.password.as_str(), "p#ss word");
    }

    #[test]
    fn test_multiline_array_rejected() {
        assert_eq!(parse_config(MULTILINE_ARRAY), Err(ConfigError::InvalidValue));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            parse_config("[display]\nbrightness = 8\n"),
            Err(ConfigError::BrightnessOutOfRange)
        );
        assert_eq!(
            parse_config("[rotary]\ndebounce_depth = 65\n"),
            Err(ConfigError::InvalidDebounceDepth)
        );
        assert_eq!(
            parse_config("[rotary]\ndebounce_depth = 0\n"),
            Err(ConfigError::InvalidDebounceDepth)
        );
        assert_eq!(
            parse_config("[display]\nbrightness = -1\n"),
            Err(ConfigError::InvalidValue)
        );
    }

    #[test]
    fn test_rejects_conflicting_pins() {
        assert_eq!(
            parse_config("[rtc]\nce_pin = \"gpio16\"\n"),
            Err(ConfigError::PinConflict(16))
        );
    }

    #[test]
    fn test_rejects_unknown() {
        assert_eq!(parse_config("[heater]\n"), Err(ConfigError::InvalidSection));
        assert_eq!(parse_config("[display]\nspeed = 3\n"), Err(ConfigError::UnknownKey));
        assert_eq!(parse_config("brightness = 3\n"), Err(ConfigError::UnknownKey));
        assert_eq!(parse_config("[display]\nbrightness\n"), Err(ConfigError::InvalidValue));
    }

    #[test]
    fn test_rejects_long_strings() {
        let input = "[wifi]\nssid = \"this-ssid-is-definitely-longer-than-32-bytes\"\n";
        assert_eq!(parse_config(input), Err(ConfigError::TooLong));
    }

    #[test]
    fn test_shipped_config_parses() {
        let config = parse_config(include_str!("../../../qrclock-firmware/clock.toml")).unwrap();
        assert_eq!(config.display.clk_pin.pin, 16);
        assert_eq!(config.display.data_pins, ClockConfig::default().display.data_pins);
    }
}
