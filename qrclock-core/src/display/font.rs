//! Fixed 5×7 bitmap font
//!
//! Each glyph is six column bytes: five data columns and one blank
//! spacing column. Bit 6 of a column byte is the top pixel and bit 0 the
//! bottom one, so the top row of the 8-pixel glyph cell is always blank.
//!
//! Only the characters the clock screens need are present. Anything else
//! maps to the blank glyph.

/// Column bytes per glyph (5 data + 1 spacing)
pub const GLYPH_WIDTH: usize = 6;

/// Pixel rows per glyph cell
pub const GLYPH_HEIGHT: usize = 8;

/// Glyph cells per text line
pub const CELLS_PER_LINE: usize = 5;

/// Text lines on the panel
pub const LINES: usize = 4;

/// Column bitmap of one glyph
pub type GlyphColumns = [u8; GLYPH_WIDTH];

/// Glyph used for characters missing from the table
pub const BLANK: GlyphColumns = [0; GLYPH_WIDTH];

static FONT: [(char, GlyphColumns); 25] = [
    ('0', [0b0111110, 0b1000101, 0b1001001, 0b1010001, 0b0111110, 0]),
    ('1', [0b0000000, 0b0100001, 0b1111111, 0b0000001, 0b0000000, 0]),
    ('2', [0b0100001, 0b1000011, 0b1000101, 0b1001001, 0b0110001, 0]),
    ('3', [0b1000010, 0b1000001, 0b1010001, 0b1101001, 0b1000110, 0]),
    ('4', [0b0001100, 0b0010100, 0b0100100, 0b1111111, 0b0000100, 0]),
    ('5', [0b1110010, 0b1010001, 0b1010001, 0b1010001, 0b1001110, 0]),
    ('6', [0b0011110, 0b0101001, 0b1001001, 0b1001001, 0b0000110, 0]),
    ('7', [0b1000000, 0b1000111, 0b1001000, 0b1010000, 0b1100000, 0]),
    ('8', [0b0110110, 0b1001001, 0b1001001, 0b1001001, 0b0110110, 0]),
    ('9', [0b0110000, 0b1001001, 0b1001001, 0b1001010, 0b0111100, 0]),
    ('A', [0b0111111, 0b1000100, 0b1000100, 0b1000100, 0b0111111, 0]),
    ('D', [0b1111111, 0b1000001, 0b1000001, 0b0100010, 0b0011100, 0]),
    ('G', [0b0111110, 0b1000001, 0b1001001, 0b1001001, 0b1101111, 0]),
    ('I', [0b0000000, 0b1000001, 0b1111111, 0b1000001, 0b0000000, 0]),
    ('N', [0b1111111, 0b0010000, 0b0001000, 0b0000100, 0b1111111, 0]),
    ('P', [0b1111111, 0b1001000, 0b1001000, 0b1001000, 0b0110000, 0]),
    ('Q', [0b0111110, 0b1000001, 0b1000101, 0b1000010, 0b0111101, 0]),
    ('R', [0b1111111, 0b1001000, 0b1001100, 0b1001010, 0b0110001, 0]),
    ('T', [0b1000000, 0b1000000, 0b1111111, 0b1000000, 0b1000000, 0]),
    ('o', [0b0011100, 0b0100010, 0b0100010, 0b0100010, 0b0011100, 0]),
    ('x', [0b0100010, 0b0010100, 0b0001000, 0b0010100, 0b0100010, 0]),
    ('>', [0b1000001, 0b0100010, 0b0010100, 0b0001000, 0b0000000, 0]),
    ('/', [0b0000010, 0b0000100, 0b0001000, 0b0010000, 0b0100000, 0]),
    ('_', [0b0000001, 0b0000001, 0b0000001, 0b0000001, 0b0000001, 0]),
    (':', [0b0000000, 0b0000000, 0b0010100, 0b0000000, 0b0000000, 0]),
];

/// Look up the column bitmap for a character
pub fn glyph(ch: char) -> &'static GlyphColumns {
    FONT.iter()
        .find(|(c, _)| *c == ch)
        .map(|(_, columns)| columns)
        .unwrap_or(&BLANK)
}

/// Whether a character has a glyph of its own
pub fn is_supported(ch: char) -> bool {
    FONT.iter().any(|(c, _)| *c == ch)
}

/// Whether the glyph pixel at (`row`, `column`) inside its cell is lit
///
/// `row` counts from the top of the 8-pixel cell.
#[inline]
pub fn pixel(columns: &GlyphColumns, row: usize, column: usize) -> bool {
    (columns[column] >> (GLYPH_HEIGHT - 1 - row)) & 1 != 0
}
