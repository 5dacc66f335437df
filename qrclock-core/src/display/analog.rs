//! Analog clock face
//!
//! Hands are drawn as rays from the panel center. Angles are in radians
//! with 0 pointing right and positive angles turning clockwise, because
//! pixel rows grow downward. Twelve o'clock is therefore `-π/2`.

use core::f32::consts::{FRAC_PI_2, PI};

use libm::{cosf, roundf, sinf};

use super::matrix::{LogicalMatrix, Plane};

/// Row and column of the face center
pub const CENTER: f32 = 16.0;

/// Radius of the hour markers
pub const MARKER_RADIUS: f32 = 15.0;

/// Second hand length
pub const SECOND_HAND: f32 = 12.0;
/// Minute hand length
pub const MINUTE_HAND: f32 = 10.0;
/// Hour hand length
pub const HOUR_HAND: f32 = 8.0;

/// Sampling step along a hand, in pixels
const STEP: f32 = 0.5;

/// Angle of a position on a 60-step dial (`0` at twelve o'clock)
pub fn dial_angle(position: f32) -> f32 {
    2.0 * PI * position / 60.0 - FRAC_PI_2
}

/// Angle of the hour hand, advancing in 12-minute steps between hours
pub fn hour_angle(hour: u8, minute: u8) -> f32 {
    dial_angle(f32::from(hour % 12 * 5 + minute / 12))
}

/// Pixel coordinate at distance `radius` along `angle`
fn polar(radius: f32, angle: f32) -> (i32, i32) {
    let row = roundf(CENTER + radius * sinf(angle)) as i32;
    let col = roundf(CENTER + radius * cosf(angle)) as i32;
    (row, col)
}

fn plot(matrix: &mut LogicalMatrix, (row, col): (i32, i32), plane: Plane) {
    if row >= 0 && col >= 0 {
        matrix.set_pixel(row as usize, col as usize, plane);
    }
}

/// Clear the matrix and draw the dial
///
/// Twelve hour markers sit on a circle of [`MARKER_RADIUS`]. The
/// quarter-hour markers are two pixels long.
pub fn draw_background(matrix: &mut LogicalMatrix, plane: Plane) {
    matrix.clear();

    for hour in 0..12u8 {
        let angle = dial_angle(f32::from(hour * 5));
        plot(matrix, polar(MARKER_RADIUS, angle), plane);
        if hour % 3 == 0 {
            plot(matrix, polar(MARKER_RADIUS - 1.0, angle), plane);
        }
    }
    plot(matrix, (CENTER as i32, CENTER as i32), plane);
}

/// Draw one hand from the center out to `length`
pub fn draw_hand(matrix: &mut LogicalMatrix, length: f32, angle: f32, plane: Plane) {
    let mut t = 0.0;
    while t <= length {
        plot(matrix, polar(t, angle), plane);
        t += STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_markers() {
        let mut matrix = LogicalMatrix::new();
        matrix.set_pixel(5, 5, Plane::B);
        draw_background(&mut matrix, Plane::A);

        // Cleared before drawing
        assert_eq!(matrix.get(5, 5).map(|c| c.b), Some(false));

        // Twelve, three, six, nine o'clock
        assert!(matrix.get(1, 16).unwrap().a);
        assert!(matrix.get(2, 16).unwrap().a);
        assert!(matrix.get(16, 31).unwrap().a);
        assert!(matrix.get(31, 16).unwrap().a);
        assert!(matrix.get(16, 1).unwrap().a);

        // 12 markers, 4 of them doubled, plus the center
        assert_eq!(matrix.lit_count(), 12 + 4 + 1);
    }

    #[test]
    fn test_hand_straight_up() {
        let mut matrix = LogicalMatrix::new();
        draw_hand(&mut matrix, SECOND_HAND, dial_angle(0.0), Plane::B);

        for row in 4..=16 {
            assert!(matrix.get(row, 16).unwrap().b, "row {}", row);
        }
        assert_eq!(matrix.lit_count(), 13);
    }

    #[test]
    fn test_hand_at_quarter_past() {
        let mut matrix = LogicalMatrix::new();
        draw_hand(&mut matrix, MINUTE_HAND, dial_angle(15.0), Plane::Both);

        for col in 16..=26 {
            assert_eq!(matrix.get(16, col), Some(Plane::Both.cell()));
        }
        assert!(matrix.get(16, 27).unwrap().is_off());
    }

    #[test]
    fn test_hour_angle_steps() {
        assert_eq!(hour_angle(3, 0), dial_angle(15.0));
        assert_eq!(hour_angle(15, 0), dial_angle(15.0));
        assert_eq!(hour_angle(3, 11), dial_angle(15.0));
        assert_eq!(hour_angle(3, 12), dial_angle(16.0));
        assert_eq!(hour_angle(11, 59), dial_angle(59.0));
    }

    #[test]
    fn test_hands_stay_on_panel() {
        let mut matrix = LogicalMatrix::new();
        for position in 0..60 {
            draw_hand(&mut matrix, SECOND_HAND, dial_angle(position as f32), Plane::A);
        }
        // Nothing reaches the outer marker ring
        for i in 0..32 {
            assert!(matrix.get(0, i).unwrap().is_off());
            assert!(matrix.get(i, 0).unwrap().is_off());
        }
    }
}
