//! Per-poll input processing for the rotary encoder

use super::debounce::{DebounceFilter, Edge};
use super::events::PendingEvents;
use super::quadrature::{QuadratureDecoder, RotaryState};
use crate::config::ConfigError;

/// One raw sample of the three encoder pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSample {
    /// Phase A level
    pub a: bool,
    /// Phase B level
    pub b: bool,
    /// Push switch level (low when pressed)
    pub push: bool,
}

impl PinSample {
    /// All pins pulled high: encoder at rest, switch released
    pub const IDLE: PinSample = PinSample {
        a: true,
        b: true,
        push: true,
    };
}

/// Debounces the encoder pins and latches rotate/press events
pub struct InputAggregator<'a> {
    a: DebounceFilter,
    b: DebounceFilter,
    push: DebounceFilter,
    decoder: QuadratureDecoder,
    events: &'a PendingEvents,
}

impl<'a> InputAggregator<'a> {
    /// Create an aggregator with the given debounce depth for all pins
    pub fn new(depth: u8, events: &'a PendingEvents) -> Result<Self, ConfigError> {
        Ok(Self {
            a: DebounceFilter::new(depth)?,
            b: DebounceFilter::new(depth)?,
            push: DebounceFilter::new(depth)?,
            decoder: QuadratureDecoder::new(),
            events,
        })
    }

    /// Process one sample of all three pins
    ///
    /// The decoder runs at most once per poll, and only when a phase pin
    /// changed its confirmed level.
    pub fn poll(&mut self, sample: PinSample) {
        let edge_a = self.a.update(sample.a);
        let edge_b = self.b.update(sample.b);
        let edge_push = self.push.update(sample.push);

        if edge_a.is_some() || edge_b.is_some() {
            let delta = self
                .decoder
                .decode(self.a.level().is_high(), self.b.level().is_high());
            self.events.latch_rotation(delta);
        }

        if edge_push == Some(Edge::Falling) {
            self.events.latch_press();
        }
    }

    pub fn events(&self) -> &'a PendingEvents {
        self.events
    }

    pub fn decoder_state(&self) -> RotaryState {
        self.decoder.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPTH: u8 = 4;

    fn hold(aggregator: &mut InputAggregator<'_>, sample: PinSample) {
        for _ in 0..DEPTH {
            aggregator.poll(sample);
        }
    }

    fn phases(a: bool, b: bool) -> PinSample {
        PinSample { a, b, push: true }
    }

    #[test]
    fn test_rejects_bad_depth() {
        let events = PendingEvents::new();
        assert!(InputAggregator::new(0, &events).is_err());
        assert!(InputAggregator::new(65, &events).is_err());
    }

    #[test]
    fn test_idle_produces_nothing() {
        let events = PendingEvents::new();
        let mut aggregator = InputAggregator::new(DEPTH, &events).unwrap();
        for _ in 0..100 {
            aggregator.poll(PinSample::IDLE);
        }
        assert_eq!(events.rotation(), 0);
        assert!(!events.pressed());
    }

    #[test]
    fn test_clockwise_detent_latches_one_step() {
        let events = PendingEvents::new();
        let mut aggregator = InputAggregator::new(DEPTH, &events).unwrap();
        hold(&mut aggregator, PinSample::IDLE);

        for (a, b) in [(false, true), (false, false), (true, false), (true, true)] {
            hold(&mut aggregator, phases(a, b));
        }

        assert_eq!(aggregator.decoder_state(), RotaryState::Start);
        assert_eq!(events.take_rotation(), -1);
        assert_eq!(events.take_rotation(), 0);
    }

    #[test]
    fn test_default_rate_catches_hand_turn() {
        let rotary = crate::config::RotaryConfig::default();
        // A brisk turn holds each phase state for about 10 ms
        let polls_per_state = 10_000 / rotary.poll_interval_us;

        let events = PendingEvents::new();
        let mut aggregator = InputAggregator::new(rotary.debounce_depth, &events).unwrap();
        for (a, b) in [(false, true), (false, false), (true, false), (true, true)] {
            for _ in 0..polls_per_state {
                aggregator.poll(phases(a, b));
            }
        }

        assert_eq!(events.take_rotation(), -1);
    }

    #[test]
    fn test_counter_clockwise_detent() {
        let events = PendingEvents::new();
        let mut aggregator = InputAggregator::new(DEPTH, &events).unwrap();
        hold(&mut aggregator, PinSample::IDLE);

        for (a, b) in [(true, false), (false, false), (false, true), (true, true)] {
            hold(&mut aggregator, phases(a, b));
        }

        assert_eq!(events.take_rotation(), 1);
    }

    #[test]
    fn test_rotation_overwritten_not_summed() {
        let events = PendingEvents::new();
        let mut aggregator = InputAggregator::new(DEPTH, &events).unwrap();
        hold(&mut aggregator, PinSample::IDLE);

        for (a, b) in [(false, true), (false, false), (true, false), (true, true)] {
            hold(&mut aggregator, phases(a, b));
        }
        for (a, b) in [(true, false), (false, false), (false, true), (true, true)] {
            hold(&mut aggregator, phases(a, b));
        }

        // Latest direction wins
        assert_eq!(events.take_rotation(), 1);
    }

    #[test]
    fn test_short_glitch_is_ignored() {
        let events = PendingEvents::new();
        let mut aggregator = InputAggregator::new(DEPTH, &events).unwrap();
        hold(&mut aggregator, PinSample::IDLE);

        aggregator.poll(phases(false, false));
        aggregator.poll(phases(false, false));
        hold(&mut aggregator, PinSample::IDLE);

        assert_eq!(aggregator.decoder_state(), RotaryState::Start);
        assert_eq!(events.rotation(), 0);
    }

    #[test]
    fn test_press_on_falling_edge_only() {
        let events = PendingEvents::new();
        let mut aggregator = InputAggregator::new(DEPTH, &events).unwrap();
        hold(&mut aggregator, PinSample::IDLE);

        let pressed = PinSample {
            push: false,
            ..PinSample::IDLE
        };
        aggregator.poll(pressed);
        aggregator.poll(pressed);
        aggregator.poll(pressed);
        assert!(!events.pressed());
        aggregator.poll(pressed);
        assert!(events.pressed());

        // Release does not set or clear the flag
        hold(&mut aggregator, PinSample::IDLE);
        assert!(events.take_press());
        assert!(!events.pressed());
    }

    #[test]
    fn test_press_held_until_consumed() {
        let events = PendingEvents::new();
        let mut aggregator = InputAggregator::new(DEPTH, &events).unwrap();
        let pressed = PinSample {
            push: false,
            ..PinSample::IDLE
        };
        hold(&mut aggregator, pressed);
        for _ in 0..50 {
            aggregator.poll(PinSample::IDLE);
        }
        assert!(events.pressed());
    }
}
