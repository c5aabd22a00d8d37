//! # Game Mathematics
//!
//! Grid geometry helpers shared by corridor carving and field of view.

use crate::game::Position;

/// Returns the cells of a Bresenham line from `start` to `end`, both ends included.
///
/// # Examples
///
/// ```
/// use tombs::{bresenham_line, Position};
///
/// let line = bresenham_line(Position::new(0, 0), Position::new(3, 1));
/// assert_eq!(line.first(), Some(&Position::new(0, 0)));
/// assert_eq!(line.last(), Some(&Position::new(3, 1)));
/// assert_eq!(line.len(), 4);
/// ```
pub fn bresenham_line(start: Position, end: Position) -> Vec<Position> {
    let dx = (end.x - start.x).abs();
    let dy = -(end.y - start.y).abs();
    let step_x = if start.x < end.x { 1 } else { -1 };
    let step_y = if start.y < end.y { 1 } else { -1 };

    let mut points = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    let mut current = start;
    let mut error = dx + dy;

    loop {
        points.push(current);
        if current == end {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            current.x += step_x;
        }
        if doubled <= dx {
            error += dx;
            current.y += step_y;
        }
    }

    points
}

/// Clamps `value` into the inclusive range `[low, high]`.
pub fn clamp_i32(value: i32, low: i32, high: i32) -> i32 {
    value.max(low).min(high)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_single_point() {
        let p = Position::new(4, 4);
        assert_eq!(bresenham_line(p, p), vec![p]);
    }

    #[test]
    fn test_line_horizontal_and_vertical() {
        let line = bresenham_line(Position::new(2, 5), Position::new(6, 5));
        assert_eq!(line.len(), 5);
        assert!(line.iter().all(|p| p.y == 5));

        let line = bresenham_line(Position::new(3, 9), Position::new(3, 4));
        assert_eq!(line.len(), 6);
        assert_eq!(line.last(), Some(&Position::new(3, 4)));
    }

    #[test]
    fn test_line_steps_are_adjacent() {
        let line = bresenham_line(Position::new(-3, 7), Position::new(11, -2));
        for pair in line.windows(2) {
            assert_eq!(pair[0].chebyshev_distance(pair[1]), 1);
        }
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp_i32(-4, 0, 10), 0);
        assert_eq!(clamp_i32(14, 0, 10), 10);
        assert_eq!(clamp_i32(7, 0, 10), 7);
    }
}
