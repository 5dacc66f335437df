//! Half-step quadrature decoder
//!
//! Gray-code state machine over the two debounced phase levels. A tick
//! is emitted whenever the encoder arrives at a rest position (both
//! phases equal), so one full detent cycle produces two ticks in the
//! same direction. Bounces between neighboring states never emit.

/// Decoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RotaryState {
    Start = 0,
    Cw1,
    Cw2,
    Cw3,
    Ccw1,
    Ccw2,
    Ccw3,
    Illegal,
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Signed step reported to the menu: clockwise is -1
    pub const fn delta(self) -> i8 {
        match self {
            Direction::Clockwise => -1,
            Direction::CounterClockwise => 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    next: RotaryState,
    tick: Option<Direction>,
}

const fn go(next: RotaryState) -> Transition {
    Transition { next, tick: None }
}

const fn cw(next: RotaryState) -> Transition {
    Transition {
        next,
        tick: Some(Direction::Clockwise),
    }
}

const fn ccw(next: RotaryState) -> Transition {
    Transition {
        next,
        tick: Some(Direction::CounterClockwise),
    }
}

use RotaryState::*;

/// Indexed by `[state][(a << 1) | b]`
static TRANSITIONS: [[Transition; 4]; 8] = [
    /* Start   */ [go(Cw3), go(Cw2), go(Cw1), go(Start)],
    /* Cw1     */ [ccw(Cw3), go(Start), go(Cw1), go(Start)],
    /* Cw2     */ [cw(Cw3), go(Cw2), go(Start), go(Start)],
    /* Cw3     */ [go(Cw3), go(Ccw2), go(Ccw1), go(Start)],
    /* Ccw1    */ [go(Cw3), go(Cw2), go(Ccw1), cw(Start)],
    /* Ccw2    */ [go(Cw3), go(Ccw2), go(Cw3), ccw(Start)],
    /* Ccw3    */ [go(Start), go(Start), go(Start), go(Start)],
    /* Illegal */ [go(Start), go(Start), go(Start), go(Start)],
];

/// Quadrature state machine
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    state: RotaryState,
}

impl QuadratureDecoder {
    pub const fn new() -> Self {
        Self {
            state: RotaryState::Start,
        }
    }

    pub fn state(&self) -> RotaryState {
        self.state
    }

    /// Advance with the current phase levels
    pub fn step(&mut self, a: bool, b: bool) -> Option<Direction> {
        let input = (usize::from(a) << 1) | usize::from(b);
        let transition = TRANSITIONS[self.state as usize][input];
        self.state = transition.next;
        transition.tick
    }

    /// Advance and return the signed step (-1, 0 or +1)
    pub fn decode(&mut self, a: bool, b: bool) -> i8 {
        self.step(a, b).map_or(0, Direction::delta)
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Phase levels as (a, b)
    const CLOCKWISE: [(bool, bool); 4] = [(false, true), (false, false), (true, false), (true, true)];
    const COUNTER_CLOCKWISE: [(bool, bool); 4] =
        [(true, false), (false, false), (false, true), (true, true)];

    fn run(decoder: &mut QuadratureDecoder, steps: &[(bool, bool)]) -> [i8; 4] {
        let mut out = [0; 4];
        for (i, &(a, b)) in steps.iter().enumerate() {
            out[i] = decoder.decode(a, b);
        }
        out
    }

    #[test]
    fn test_starts_at_rest() {
        assert_eq!(QuadratureDecoder::new().state(), RotaryState::Start);
    }

    #[test]
    fn test_clockwise_cycle() {
        let mut decoder = QuadratureDecoder::new();
        assert_eq!(run(&mut decoder, &CLOCKWISE), [0, -1, 0, -1]);
        assert_eq!(decoder.state(), RotaryState::Start);
    }

    #[test]
    fn test_counter_clockwise_cycle() {
        let mut decoder = QuadratureDecoder::new();
        assert_eq!(run(&mut decoder, &COUNTER_CLOCKWISE), [0, 1, 0, 1]);
        assert_eq!(decoder.state(), RotaryState::Start);
    }

    #[test]
    fn test_repeated_cycles_keep_direction() {
        let mut decoder = QuadratureDecoder::new();
        for _ in 0..5 {
            assert!(run(&mut decoder, &CLOCKWISE).iter().all(|&d| d <= 0));
        }
        for _ in 0..5 {
            assert!(run(&mut decoder, &COUNTER_CLOCKWISE).iter().all(|&d| d >= 0));
        }
    }

    #[test]
    fn test_return_to_start_is_silent() {
        let mut decoder = QuadratureDecoder::new();
        assert_eq!(decoder.decode(false, true), 0);
        assert_eq!(decoder.decode(true, true), 0);
        assert_eq!(decoder.state(), RotaryState::Start);

        assert_eq!(decoder.decode(true, false), 0);
        assert_eq!(decoder.decode(true, true), 0);
        assert_eq!(decoder.state(), RotaryState::Start);
    }

    #[test]
    fn test_bounce_on_one_phase() {
        let mut decoder = QuadratureDecoder::new();
        // Contact bounce between 11 and 01 never reaches a rest position
        for _ in 0..10 {
            assert_eq!(decoder.decode(false, true), 0);
            assert_eq!(decoder.decode(true, true), 0);
        }
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Clockwise.delta(), -1);
        assert_eq!(Direction::CounterClockwise.delta(), 1);
    }

    #[test]
    fn test_dead_states_reset() {
        for state in [RotaryState::Ccw3, RotaryState::Illegal] {
            for input in 0..4usize {
                let t = TRANSITIONS[state as usize][input];
                assert_eq!(t.next, RotaryState::Start);
                assert!(t.tick.is_none());
            }
        }
    }
}
