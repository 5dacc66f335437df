//! Sliding-window debounce filter
//!
//! Every sample is shifted into a 64-bit history. The stable level only
//! changes once the newest `depth` samples all agree.

use crate::config::ConfigError;

/// Largest supported window
pub const MAX_DEPTH: u8 = 64;

/// Window used when none is configured
pub const DEFAULT_DEPTH: u8 = 64;

/// Alternating history so neither level is confirmed at start-up
///
/// Bit 0 is clear, so it counts as one low sample. A 64-deep window
/// therefore confirms the first falling edge after 63 real low samples.
const INITIAL_HISTORY: u64 = 0xAAAA_AAAA_AAAA_AAAA;

/// Confirmed pin level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Change of confirmed level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

/// Debounce state for one input pin
#[derive(Debug, Clone)]
pub struct DebounceFilter {
    history: u64,
    mask: u64,
    depth: u8,
    level: Level,
}

impl DebounceFilter {
    /// Create a filter confirming a level after `depth` equal samples
    ///
    /// The initial level is high, matching the pull-ups on the encoder
    /// pins.
    pub fn new(depth: u8) -> Result<Self, ConfigError> {
        if depth == 0 || depth > MAX_DEPTH {
            return Err(ConfigError::InvalidDebounceDepth);
        }

        let mask = if depth >= MAX_DEPTH {
            u64::MAX
        } else {
            (1u64 << depth) - 1
        };

        Ok(Self {
            history: INITIAL_HISTORY,
            mask,
            depth,
            level: Level::High,
        })
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Last confirmed level
    pub fn level(&self) -> Level {
        self.level
    }

    /// Shift in one raw sample, returning an edge if the level changed
    pub fn update(&mut self, sample: bool) -> Option<Edge> {
        self.history = (self.history << 1) | u64::from(sample);

        let window = self.history & self.mask;
        let confirmed = if window == self.mask {
            Level::High
        } else if window == 0 {
            Level::Low
        } else {
            return None;
        };

        let previous = self.level;
        self.level = confirmed;

        match (previous, confirmed) {
            (Level::Low, Level::High) => Some(Edge::Rising),
            (Level::High, Level::Low) => Some(Edge::Falling),
            _ => None,
        }
    }
}

impl Default for DebounceFilter {
    fn default() -> Self {
        Self {
            history: INITIAL_HISTORY,
            mask: u64::MAX,
            depth: DEFAULT_DEPTH,
            level: Level::High,
        }
    }
}
