//! QR symbol placement
//!
//! Symbol generation is delegated to a
//! [`SymbolEncoder`](crate::traits::SymbolEncoder) so the core
//! stays free of any particular QR library. The encoder returns a
//! square module bitmap that is copied onto the panel with a one-pixel
//! quiet border on the top and left.

use super::matrix::{LogicalMatrix, Plane};
use super::PANEL_SIZE;

/// Widest symbol that fits with the one-pixel offset
pub const MAX_SYMBOL_WIDTH: usize = PANEL_SIZE - 1;

/// Offset of module (0, 0) on the panel
pub const SYMBOL_OFFSET: usize = 1;

/// Square module bitmap of a QR symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolBitmap {
    width: usize,
    rows: [u32; MAX_SYMBOL_WIDTH],
}

impl SymbolBitmap {
    /// Empty bitmap, or `None` if wider than the panel allows
    pub fn new(width: usize) -> Option<Self> {
        if width == 0 || width > MAX_SYMBOL_WIDTH {
            return None;
        }
        Some(Self {
            width,
            rows: [0; MAX_SYMBOL_WIDTH],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Set the module at column `x`, row `y` dark
    pub fn set(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.width {
            self.rows[y] |= 1 << x;
        }
    }

    /// Whether the module at column `x`, row `y` is dark
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && (self.rows[y] >> x) & 1 != 0
    }
}

/// Clear the matrix and copy the symbol's dark modules onto it
pub fn draw_symbol(matrix: &mut LogicalMatrix, symbol: &SymbolBitmap, plane: Plane) {
    matrix.clear();
    for y in 0..symbol.width() {
        for x in 0..symbol.width() {
            if symbol.get(x, y) {
                matrix.set_pixel(y + SYMBOL_OFFSET, x + SYMBOL_OFFSET, plane);
            }
        }
    }
}
