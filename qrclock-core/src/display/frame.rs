//! Physical frame: per-chip bitplanes ready for shifting out

use super::address::PixelAddress;
use super::matrix::Cell;
use super::{CHANNEL_COUNT, PLANE_COUNT};

/// Plane index of the red LEDs in a channel's word pair
pub const PLANE_A: usize = 0;
/// Plane index of the green LEDs in a channel's word pair
pub const PLANE_B: usize = 1;

/// 16 channels × 2 planes × 64-bit bitplane
///
/// Recomputed from a [`LogicalMatrix`](super::LogicalMatrix) before
/// every bus write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhysicalFrame {
    planes: [[u64; PLANE_COUNT]; CHANNEL_COUNT],
}

impl PhysicalFrame {
    /// All-dark frame
    pub const fn new() -> Self {
        Self {
            planes: [[0; PLANE_COUNT]; CHANNEL_COUNT],
        }
    }

    /// Build a frame directly from raw bitplanes
    pub const fn from_planes(planes: [[u64; PLANE_COUNT]; CHANNEL_COUNT]) -> Self {
        Self { planes }
    }

    /// OR a logical cell into the frame at the given address
    pub fn apply(&mut self, addr: PixelAddress, cell: Cell) {
        let words = &mut self.planes[addr.channel as usize];
        if cell.a {
            words[PLANE_A] |= addr.mask();
        }
        if cell.b {
            words[PLANE_B] |= addr.mask();
        }
    }

    /// Bitplane word for one channel and plane
    #[inline]
    pub fn plane(&self, channel: usize, plane: usize) -> u64 {
        self.planes[channel][plane]
    }

    /// Whether a single bit is set
    pub fn is_set(&self, channel: usize, plane: usize, bit: usize) -> bool {
        (self.planes[channel][plane] >> bit) & 1 != 0
    }

    /// Total number of set bits across all planes
    pub fn count_ones(&self) -> u32 {
        self.planes.iter().flatten().map(|word| word.count_ones()).sum()
    }

    pub fn planes(&self) -> &[[u64; PLANE_COUNT]; CHANNEL_COUNT] {
        &self.planes
    }
}
