//! Logical pixel buffer
//!
//! A 32×32 grid addressed by (row, col) with row 0 at the top. Each cell
//! carries two independent plane flags.

use super::address::AddressMap;
use super::font::{self, CELLS_PER_LINE, GLYPH_HEIGHT, GLYPH_WIDTH, LINES};
use super::frame::PhysicalFrame;
use super::PANEL_SIZE;

/// Color plane selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Plane {
    /// Plane A (red LEDs)
    A,
    /// Plane B (green LEDs)
    B,
    /// Both planes (orange)
    Both,
}

impl Plane {
    /// Cell value with exactly this selector's planes lit
    pub const fn cell(self) -> Cell {
        match self {
            Plane::A => Cell { a: true, b: false },
            Plane::B => Cell { a: false, b: true },
            Plane::Both => Cell { a: true, b: true },
        }
    }
}

/// One pixel: plane A and plane B flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell {
    pub a: bool,
    pub b: bool,
}

impl Cell {
    pub const OFF: Cell = Cell { a: false, b: false };

    pub const fn is_off(self) -> bool {
        !self.a && !self.b
    }

    /// Combine with another cell by OR-ing both planes
    pub const fn union(self, other: Cell) -> Cell {
        Cell {
            a: self.a || other.a,
            b: self.b || other.b,
        }
    }
}

/// 32×32 logical frame buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalMatrix {
    cells: [[Cell; PANEL_SIZE]; PANEL_SIZE],
}

impl LogicalMatrix {
    /// Create an all-off matrix
    pub const fn new() -> Self {
        Self {
            cells: [[Cell::OFF; PANEL_SIZE]; PANEL_SIZE],
        }
    }

    /// Turn every cell off
    pub fn clear(&mut self) {
        self.cells = [[Cell::OFF; PANEL_SIZE]; PANEL_SIZE];
    }

    /// Read a cell, or `None` outside the panel
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Light the selected planes of one pixel
    ///
    /// Planes already lit stay lit. Coordinates outside the panel are
    /// ignored.
    pub fn set_pixel(&mut self, row: usize, col: usize, plane: Plane) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = cell.union(plane.cell());
        }
    }

    /// Overwrite one pixel with an exact cell value
    pub fn write_cell(&mut self, row: usize, col: usize, value: Cell) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    /// Draw text into the glyph grid
    ///
    /// `line` selects one of 4 text lines and `col` one of 5 glyph cells.
    /// The cursor advances one cell per character and wraps to the next
    /// line after the fifth cell. Every pixel of each 6×8 cell is
    /// rewritten, so drawing over old text needs no clear. Characters
    /// past the last line are dropped.
    pub fn draw_text(&mut self, text: &str, line: usize, col: usize, plane: Plane) {
        let mut line = line;
        let mut col = col;
        let lit = plane.cell();

        for ch in text.chars() {
            if line >= LINES || col >= CELLS_PER_LINE {
                break;
            }

            let columns = font::glyph(ch);
            for x in 0..GLYPH_WIDTH {
                for y in 0..GLYPH_HEIGHT {
                    let value = if font::pixel(columns, y, x) { lit } else { Cell::OFF };
                    self.write_cell(line * GLYPH_HEIGHT + y, col * GLYPH_WIDTH + x + 1, value);
                }
            }

            col += 1;
            if col == CELLS_PER_LINE {
                col = 0;
                line += 1;
            }
        }
    }

    /// Number of cells with at least one plane lit
    pub fn lit_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_off())
            .count()
    }

    pub fn is_blank(&self) -> bool {
        self.lit_count() == 0
    }

    /// Convert to per-chip bitplanes through the address map
    pub fn to_physical_frame(&self, map: &AddressMap) -> PhysicalFrame {
        let mut frame = PhysicalFrame::new();
        for (row, col, addr) in map.iter() {
            frame.apply(addr, self.cells[row][col]);
        }
        frame
    }
}

impl Default for LogicalMatrix {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_is_blank() {
        let matrix = LogicalMatrix::new();
        assert!(matrix.is_blank());
        assert_eq!(matrix.get(31, 31), Some(Cell::OFF));
        assert_eq!(matrix.get(32, 0), None);
    }

    #[test]
    fn test_set_pixel_is_or() {
        let mut matrix = LogicalMatrix::new();
        matrix.set_pixel(3, 4, Plane::A);
        assert_eq!(matrix.get(3, 4), Some(Plane::A.cell()));

        matrix.set_pixel(3, 4, Plane::B);
        assert_eq!(matrix.get(3, 4), Some(Plane::Both.cell()));

        // Re-setting a lit plane changes nothing
        matrix.set_pixel(3, 4, Plane::A);
        assert_eq!(matrix.get(3, 4), Some(Plane::Both.cell()));
    }

    #[test]
    fn test_set_pixel_out_of_range_ignored() {
        let mut matrix = LogicalMatrix::new();
        matrix.set_pixel(32, 0, Plane::A);
        matrix.set_pixel(0, 100, Plane::Both);
        assert!(matrix.is_blank());
    }

    #[test]
    fn test_clear() {
        let mut matrix = LogicalMatrix::new();
        matrix.set_pixel(0, 0, Plane::Both);
        matrix.draw_text("88888", 1, 0, Plane::B);
        matrix.clear();
        assert!(matrix.is_blank());
    }

    #[test]
    fn test_redraw_after_clear_is_identical() {
        let mut matrix = LogicalMatrix::new();
        matrix.draw_text("12:30", 0, 0, Plane::A);
        let first = matrix.clone();
        assert!(!first.is_blank());

        matrix.clear();
        matrix.draw_text("12:30", 0, 0, Plane::A);
        assert_eq!(matrix, first);
    }

    #[test]
    fn test_draw_text_position() {
        let mut matrix = LogicalMatrix::new();
        // '_' lights only the bottom row of its cell, columns 0..5
        matrix.draw_text("_", 2, 3, Plane::A);

        let row = 2 * 8 + 7;
        for x in 0..5 {
            assert_eq!(matrix.get(row, 3 * 6 + x + 1), Some(Plane::A.cell()));
        }
        assert_eq!(matrix.lit_count(), 5);
    }

    #[test]
    fn test_draw_text_wraps() {
        let mut matrix = LogicalMatrix::new();
        matrix.draw_text("______", 0, 0, Plane::B);

        // Sixth glyph lands at line 1, cell 0
        assert_eq!(matrix.get(15, 1), Some(Plane::B.cell()));
        assert_eq!(matrix.lit_count(), 6 * 5);
    }

    #[test]
    fn test_draw_text_overwrites_cell() {
        let mut matrix = LogicalMatrix::new();
        matrix.draw_text("8", 0, 0, Plane::Both);
        matrix.draw_text("_", 0, 0, Plane::A);

        let mut expected = LogicalMatrix::new();
        expected.draw_text("_", 0, 0, Plane::A);
        assert_eq!(matrix, expected);
    }

    #[test]
    fn test_draw_text_unknown_clears_cell() {
        let mut matrix = LogicalMatrix::new();
        matrix.draw_text("8", 1, 1, Plane::A);
        matrix.draw_text("?", 1, 1, Plane::A);
        assert!(matrix.is_blank());
    }

    #[test]
    fn test_draw_text_never_touches_edges() {
        let mut matrix = LogicalMatrix::new();
        for line in 0..4 {
            matrix.set_pixel(line * 8, 0, Plane::B);
            matrix.set_pixel(line * 8, 31, Plane::B);
        }
        matrix.draw_text("88888888888888888888", 0, 0, Plane::A);

        // Column 0 and 31 are outside every glyph cell
        for line in 0..4 {
            assert_eq!(matrix.get(line * 8, 0), Some(Plane::B.cell()));
            assert_eq!(matrix.get(line * 8, 31), Some(Plane::B.cell()));
        }
    }

    #[test]
    fn test_draw_text_stops_after_last_line() {
        let mut matrix = LogicalMatrix::new();
        matrix.draw_text("_", 3, 4, Plane::A);
        let before = matrix.clone();
        // Starts past the end; nothing drawn
        matrix.draw_text("8", 4, 0, Plane::A);
        assert_eq!(matrix, before);
    }

    proptest! {
        #[test]
        fn prop_single_pixel_maps_to_single_bit(row in 0usize..32, col in 0usize..32, sel in 0u8..3) {
            let plane = match sel {
                0 => Plane::A,
                1 => Plane::B,
                _ => Plane::Both,
            };
            let map = AddressMap::build();
            let mut matrix = LogicalMatrix::new();
            matrix.set_pixel(row, col, plane);

            let frame = matrix.to_physical_frame(&map);
            let addr = map.get(row, col).unwrap();
            let cell = plane.cell();

            prop_assert_eq!(frame.is_set(addr.channel as usize, 0, addr.bit as usize), cell.a);
            prop_assert_eq!(frame.is_set(addr.channel as usize, 1, addr.bit as usize), cell.b);
            prop_assert_eq!(frame.count_ones(), cell.a as u32 + cell.b as u32);
        }

        #[test]
        fn prop_text_drawing_idempotent(text in "[0-9ADGINPQRTox>/_: ]{0,20}", line in 0usize..4, col in 0usize..5) {
            let mut once = LogicalMatrix::new();
            once.draw_text(&text, line, col, Plane::B);
            let mut twice = once.clone();
            twice.draw_text(&text, line, col, Plane::B);
            prop_assert_eq!(once, twice);
        }
    }
}
