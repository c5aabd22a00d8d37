//! # Field of View
//!
//! Ray-cast visibility over a transparency map. Rays are Bresenham lines from the
//! origin to every cell on the perimeter of the bounding square; a ray stops at
//! the first opaque cell (which is itself lit) or when it leaves the radius.

use crate::game::Position;
use crate::utils::bresenham_line;

/// Computes the visible set from `origin`.
///
/// Returns a row-major `width * height` mask. `is_transparent` is only ever
/// called with in-bounds positions.
pub fn compute_fov<F>(
    width: i32,
    height: i32,
    origin: Position,
    radius: i32,
    is_transparent: F,
) -> Vec<bool>
where
    F: Fn(Position) -> bool,
{
    let mut visible = vec![false; (width.max(0) * height.max(0)) as usize];
    let in_bounds = |p: Position| p.x >= 0 && p.y >= 0 && p.x < width && p.y < height;
    if !in_bounds(origin) {
        return visible;
    }
    visible[(origin.y * width + origin.x) as usize] = true;

    let radius_sq = radius * radius;
    for target in square_perimeter(origin, radius) {
        for point in bresenham_line(origin, target).into_iter().skip(1) {
            if !in_bounds(point) {
                break;
            }
            let delta = point - origin;
            if delta.x * delta.x + delta.y * delta.y > radius_sq {
                break;
            }
            visible[(point.y * width + point.x) as usize] = true;
            if !is_transparent(point) {
                break;
            }
        }
    }

    visible
}

fn square_perimeter(center: Position, radius: i32) -> Vec<Position> {
    if radius <= 0 {
        return Vec::new();
    }
    let (left, right) = (center.x - radius, center.x + radius);
    let (top, bottom) = (center.y - radius, center.y + radius);

    let mut cells = Vec::with_capacity((radius * 8) as usize);
    for x in left..=right {
        cells.push(Position::new(x, top));
        cells.push(Position::new(x, bottom));
    }
    for y in (top + 1)..bottom {
        cells.push(Position::new(left, y));
        cells.push(Position::new(right, y));
    }
    cells
}
