//! Rotary encoder with push switch
//!
//! Samples the three pins and feeds them through the core
//! [`InputAggregator`], which debounces them and latches rotate and
//! press events into shared [`PendingEvents`].

use qrclock_core::config::ConfigError;
use qrclock_core::input::{InputAggregator, PendingEvents, PinSample};
use qrclock_hal::InputPin;

/// Encoder on three pulled-up input lines
pub struct RotaryEncoder<'a, A, B, P> {
    a: A,
    b: B,
    push: P,
    aggregator: InputAggregator<'a>,
}

impl<'a, A, B, P> RotaryEncoder<'a, A, B, P>
where
    A: InputPin,
    B: InputPin,
    P: InputPin,
{
    pub fn new(a: A, b: B, push: P, debounce_depth: u8, events: &'a PendingEvents) -> Result<Self, ConfigError> {
        Ok(Self {
            a,
            b,
            push,
            aggregator: InputAggregator::new(debounce_depth, events)?,
        })
    }

    /// Read the raw pin levels
    pub fn sample(&self) -> PinSample {
        PinSample {
            a: self.a.is_high(),
            b: self.b.is_high(),
            push: self.push.is_high(),
        }
    }

    /// Sample once and update the pending events
    pub fn poll(&mut self) {
        let sample = self.sample();
        self.aggregator.poll(sample);
    }

    pub fn events(&self) -> &'a PendingEvents {
        self.aggregator.events()
    }
}
