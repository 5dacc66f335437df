//! GPIO line wrappers
//!
//! Thin newtypes so the embassy-rp pin drivers can stand in for the
//! `qrclock-hal` traits.

use embassy_rp::gpio::{AnyPin, Flex, Input, Level, Output, Pull};
use embassy_rp::Peri;
use qrclock_hal::{FlexPin, InputPin, OutputPin};

/// Push-pull output
pub struct RpOutput(Output<'static>);

impl RpOutput {
    pub fn new(pin: Peri<'static, AnyPin>, initial_high: bool) -> Self {
        Self(Output::new(pin, Level::from(initial_high)))
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Input with optional pull-up
pub struct RpInput(Input<'static>);

impl RpInput {
    pub fn new(pin: Peri<'static, AnyPin>, pull_up: bool) -> Self {
        let pull = if pull_up { Pull::Up } else { Pull::None };
        Self(Input::new(pin, pull))
    }
}

impl InputPin for RpInput {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Bidirectional line, starts released
pub struct RpFlex(Flex<'static>);

impl RpFlex {
    pub fn new(pin: Peri<'static, AnyPin>) -> Self {
        let mut flex = Flex::new(pin);
        flex.set_as_input();
        Self(flex)
    }
}

impl OutputPin for RpFlex {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

impl InputPin for RpFlex {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

impl FlexPin for RpFlex {
    fn set_as_input(&mut self) {
        self.0.set_as_input();
    }

    fn set_as_output(&mut self) {
        self.0.set_as_output();
    }
}
