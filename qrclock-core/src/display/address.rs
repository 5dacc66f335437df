//! Logical-to-physical pixel address map
//!
//! The panel is wired as a 4×4 grid of 8×8 tiles. Tile columns are
//! numbered left to right, but tile rows are numbered bottom to top,
//! and inside a tile the column order is mirrored:
//!
//! ```text
//! channel = row / 8 + (3 - col / 8) * 4
//! bit     = (row % 8) * 8 + (7 - col % 8)
//! ```
//!
//! The map is computed once and indexed on every frame conversion.

use super::{CHANNEL_COUNT, PANEL_SIZE, TILE_SIZE};

/// Physical location of one logical pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelAddress {
    /// Driver chip index (0..16)
    pub channel: u8,
    /// Bit position inside the chip's 64-bit plane word (0..64)
    pub bit: u8,
}

impl PixelAddress {
    /// Single-bit mask selecting this pixel in a plane word
    pub const fn mask(self) -> u64 {
        1u64 << self.bit
    }
}

/// Lookup table from (row, col) to chip channel and bit
#[derive(Debug, Clone)]
pub struct AddressMap {
    table: [[PixelAddress; PANEL_SIZE]; PANEL_SIZE],
}

impl AddressMap {
    /// Build the full table for the panel wiring
    pub const fn build() -> Self {
        let mut table = [[PixelAddress { channel: 0, bit: 0 }; PANEL_SIZE]; PANEL_SIZE];
        let mut row = 0;
        while row < PANEL_SIZE {
            let mut col = 0;
            while col < PANEL_SIZE {
                table[row][col] = Self::wiring(row, col);
                col += 1;
            }
            row += 1;
        }
        Self { table }
    }

    /// Address of a pixel computed directly from the wiring formula
    const fn wiring(row: usize, col: usize) -> PixelAddress {
        let tiles_per_side = PANEL_SIZE / TILE_SIZE;
        let channel = row / TILE_SIZE + (tiles_per_side - 1 - col / TILE_SIZE) * tiles_per_side;
        let bit = (row % TILE_SIZE) * TILE_SIZE + (TILE_SIZE - 1 - col % TILE_SIZE);
        debug_assert!(channel < CHANNEL_COUNT);
        PixelAddress {
            channel: channel as u8,
            bit: bit as u8,
        }
    }

    /// Look up a pixel, or `None` if outside the panel
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<PixelAddress> {
        self.table.get(row)?.get(col).copied()
    }

    /// Iterate every pixel as `(row, col, address)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, PixelAddress)> + '_ {
        self.table.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .map(move |(col, addr)| (row, col, *addr))
        })
    }
}

impl Default for AddressMap {
    fn default() -> Self {
        Self::build()
    }
}
