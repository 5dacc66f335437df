//! Peripheral assembly from the pin configuration

use qrclock_core::config::{ConfigError, DisplayConfig, RotaryConfig, RtcConfig};
use qrclock_core::display::CHANNEL_COUNT;
use qrclock_core::input::PendingEvents;
use qrclock_drivers::{Ds1302, RotaryEncoder, Tm1640Chain};
use qrclock_hal_rp2040::{BusyDelay, PinBank, PinError, RpFlex, RpInput, RpOutput};

pub type Display = Tm1640Chain<RpOutput, BusyDelay>;
pub type RealTimeClock = Ds1302<RpOutput, RpFlex, RpOutput, BusyDelay>;
pub type Encoder = RotaryEncoder<'static, RpInput, RpInput, RpInput>;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// GPIO could not be claimed
    Pin(u8, PinError),
    /// Driver rejected its settings
    Config(ConfigError),
}

fn claim<T>(pin: u8, result: Result<T, PinError>) -> Result<T, BoardError> {
    result.map_err(|e| BoardError::Pin(pin, e))
}

pub fn display(bank: &mut PinBank, config: &DisplayConfig) -> Result<Display, BoardError> {
    let clk_pin = config.clk_pin.pin;
    let clk = claim(clk_pin, bank.output(clk_pin, true))?;

    // The first claim that fails aborts the whole chain
    let data: heapless::Vec<RpOutput, CHANNEL_COUNT> = config
        .data_pins
        .iter()
        .map(|p| claim(p.pin, bank.output(p.pin, true)))
        .collect::<Result<_, _>>()?;
    let data: [RpOutput; CHANNEL_COUNT] = data
        .into_array()
        .map_err(|_| BoardError::Config(ConfigError::WrongPinCount))?;

    Ok(Tm1640Chain::new(
        clk,
        data,
        BusyDelay,
        config.bit_delay_us,
        config.brightness,
    ))
}

pub fn rtc(bank: &mut PinBank, config: &RtcConfig) -> Result<RealTimeClock, BoardError> {
    let clk = claim(config.clk_pin.pin, bank.output(config.clk_pin.pin, false))?;
    let dio = claim(config.dio_pin.pin, bank.flex(config.dio_pin.pin))?;
    let ce = claim(config.ce_pin.pin, bank.output(config.ce_pin.pin, false))?;
    Ok(Ds1302::new(clk, dio, ce, BusyDelay, config.delay_us))
}

pub fn encoder(
    bank: &mut PinBank,
    config: &RotaryConfig,
    events: &'static PendingEvents,
) -> Result<Encoder, BoardError> {
    let a = claim(config.a_pin.pin, bank.input(config.a_pin))?;
    let b = claim(config.b_pin.pin, bank.input(config.b_pin))?;
    let push = claim(config.push_pin.pin, bank.input(config.push_pin))?;
    RotaryEncoder::new(a, b, push, config.debounce_depth, events).map_err(BoardError::Config)
}
