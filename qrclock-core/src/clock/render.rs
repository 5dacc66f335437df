//! Screen renderers
//!
//! Each function redraws the whole logical matrix for one screen.

use core::fmt::Write;

use heapless::String;

use super::app::{MenuItem, SyncStatus};
use crate::display::analog::{
    dial_angle, draw_background, draw_hand, hour_angle, HOUR_HAND, MINUTE_HAND, SECOND_HAND,
};
use crate::display::qr::draw_symbol;
use crate::display::{LogicalMatrix, Plane};
use crate::time::DateTime;
use crate::traits::SymbolEncoder;

/// Menu text color
pub const MENU_PLANE: Plane = Plane::A;
/// Digital clock color
pub const DIGITAL_PLANE: Plane = Plane::B;
/// QR module color
pub const QR_PLANE: Plane = Plane::Both;

/// Column of the NTP status character on the last menu row
const STATUS_COL: usize = 4;

/// Room for the QR text with a 5-digit year
pub const QR_TEXT_LEN: usize = 64;

/// Four text lines of five cells
pub const DIGITAL_TEXT_LEN: usize = 20;

/// Draw the menu with the cursor and sync status
///
/// ```text
/// >QR
///  ANA
///  DIG
///  NTPo
/// ```
pub fn draw_menu(matrix: &mut LogicalMatrix, cursor: MenuItem, status: SyncStatus) {
    matrix.clear();

    for item in MenuItem::ALL {
        let line = item.index();
        let marker = if item == cursor { ">" } else { " " };
        matrix.draw_text(marker, line, 0, MENU_PLANE);
        matrix.draw_text(item.label(), line, 1, MENU_PLANE);
    }

    let mut buf = [0u8; 4];
    let symbol = status.symbol().encode_utf8(&mut buf);
    matrix.draw_text(symbol, MenuItem::Ntp.index(), STATUS_COL, MENU_PLANE);
}

/// Digital clock text laid out as `yyyy/`, `mm/dd`, `hh:mm`, `  :ss`
pub fn digital_text(now: &DateTime) -> String<DIGITAL_TEXT_LEN> {
    let mut text = String::new();
    // A four-digit year fills exactly 20 characters. A longer one is cut
    // off, like the panel would cut it off anyway.
    let _ = write!(
        text,
        "{}/{:2}/{:2}{:2}:{:02}  :{:02}",
        now.year, now.month, now.day, now.hour, now.minute, now.second
    );
    text
}

/// Draw the digital clock
pub fn draw_digital(matrix: &mut LogicalMatrix, now: &DateTime) {
    matrix.clear();
    matrix.draw_text(&digital_text(now), 0, 0, DIGITAL_PLANE);
}

/// Draw the analog face with second, minute and hour hands
pub fn draw_analog(matrix: &mut LogicalMatrix, now: &DateTime) {
    draw_background(matrix, Plane::A);
    draw_hand(matrix, SECOND_HAND, dial_angle(f32::from(now.second)), Plane::B);
    draw_hand(matrix, MINUTE_HAND, dial_angle(f32::from(now.minute)), Plane::Both);
    draw_hand(matrix, HOUR_HAND, hour_angle(now.hour, now.minute), Plane::Both);
}

/// Human-readable date and time encoded in the QR symbol
pub fn qr_text(now: &DateTime) -> String<QR_TEXT_LEN> {
    let mut text = String::new();
    // Fits QR_TEXT_LEN for every u16 year
    let _ = write!(
        text,
        "{}年{}月{}日 ({}) {}時{}分{}秒",
        now.year,
        now.month,
        now.day,
        now.weekday_name_ja(),
        now.hour,
        now.minute,
        now.second
    );
    text
}

/// Draw the QR screen
///
/// Returns `false` without touching the matrix if the text could not be
/// encoded, so the previous frame stays on the panel.
pub fn draw_qr<E: SymbolEncoder>(matrix: &mut LogicalMatrix, now: &DateTime, encoder: &mut E) -> bool {
    match encoder.encode(&qr_text(now)) {
        Some(symbol) => {
            draw_symbol(matrix, &symbol, QR_PLANE);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::SymbolBitmap;

    fn sample_time() -> DateTime {
        DateTime::new(2024, 3, 5, 9, 7, 3).unwrap()
    }

    /// Encoder lighting one module per byte of text on the first row
    struct LengthEncoder;

    impl SymbolEncoder for LengthEncoder {
        fn encode(&mut self, text: &str) -> Option<SymbolBitmap> {
            let mut bitmap = SymbolBitmap::new(29)?;
            for x in 0..text.len().min(29) {
                bitmap.set(x, 0);
            }
            Some(bitmap)
        }
    }

    struct FailingEncoder;

    impl SymbolEncoder for FailingEncoder {
        fn encode(&mut self, _text: &str) -> Option<SymbolBitmap> {
            None
        }
    }

    #[test]
    fn test_digital_text_layout() {
        let text = digital_text(&sample_time());
        assert_eq!(text.as_str(), "2024/ 3/ 5 9:07  :03");
        assert_eq!(text.len(), 20);
    }

    #[test]
    fn test_qr_text() {
        let text = qr_text(&sample_time());
        assert_eq!(text.as_str(), "2024年3月5日 (火) 9時7分3秒");
    }

    #[test]
    fn test_menu_cursor_and_status() {
        let mut with_cursor = LogicalMatrix::new();
        draw_menu(&mut with_cursor, MenuItem::Digital, SyncStatus::Succeeded);

        let mut expected = LogicalMatrix::new();
        expected.draw_text(" QR", 0, 0, MENU_PLANE);
        expected.draw_text(" ANA", 1, 0, MENU_PLANE);
        expected.draw_text(">DIG", 2, 0, MENU_PLANE);
        expected.draw_text(" NTPo", 3, 0, MENU_PLANE);
        assert_eq!(with_cursor, expected);
    }

    #[test]
    fn test_menu_uses_plane_a_only() {
        let mut matrix = LogicalMatrix::new();
        draw_menu(&mut matrix, MenuItem::Qr, SyncStatus::Failed);
        for row in 0..32 {
            for col in 0..32 {
                assert!(!matrix.get(row, col).unwrap().b);
            }
        }
    }

    #[test]
    fn test_digital_redraw_is_stable() {
        let mut first = LogicalMatrix::new();
        draw_digital(&mut first, &sample_time());
        let mut second = first.clone();
        draw_digital(&mut second, &sample_time());
        assert_eq!(first, second);
        assert!(!first.is_blank());
    }

    #[test]
    fn test_analog_colors() {
        let mut matrix = LogicalMatrix::new();
        let noon = DateTime::new(2024, 1, 1, 12, 0, 30).unwrap();
        draw_analog(&mut matrix, &noon);

        // Minute and hour hands point up in orange
        assert_eq!(matrix.get(8, 16), Some(Plane::Both.cell()));
        // Second hand points down in green
        assert_eq!(matrix.get(26, 16), Some(Plane::B.cell()));
        // Twelve o'clock marker in red
        assert_eq!(matrix.get(1, 16), Some(Plane::A.cell()));
    }

    #[test]
    fn test_qr_drawn_with_offset() {
        let mut matrix = LogicalMatrix::new();
        assert!(draw_qr(&mut matrix, &sample_time(), &mut LengthEncoder));
        assert_eq!(matrix.get(1, 1), Some(QR_PLANE.cell()));
        assert!(matrix.get(0, 1).unwrap().is_off());
    }

    #[test]
    fn test_qr_failure_keeps_matrix() {
        let mut matrix = LogicalMatrix::new();
        draw_digital(&mut matrix, &sample_time());
        let before = matrix.clone();
        assert!(!draw_qr(&mut matrix, &sample_time(), &mut FailingEncoder));
        assert_eq!(matrix, before);
    }
}
