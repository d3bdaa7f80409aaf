//! # Field of View
//!
//! Line-of-sight visibility over the cave map. Floor cells are transparent,
//! walls are opaque but themselves visible when lit.

use crate::game::Map;
use crate::Vector;

/// Whether `target` lies within a circular `radius` of `origin` with every
/// cell strictly between them on the connecting line being floor.
///
/// # Examples
///
/// ```
/// use burrow::{in_sight, Map, Vector};
///
/// let map = Map::from_rows(&["....", ".x..", "...."]).unwrap();
/// assert!(in_sight(&map, Vector::new(0, 1), Vector::new(1, 1), 10));
/// assert!(!in_sight(&map, Vector::new(0, 1), Vector::new(3, 1), 10));
/// ```
pub fn in_sight(map: &Map, origin: Vector, target: Vector, radius: u32) -> bool {
    let radius = radius as i32;
    let offset = target - origin;
    map.in_bounds(origin)
        && map.in_bounds(target)
        && offset.x * offset.x + offset.y * offset.y <= radius * radius
        && line_is_clear(map, origin, target)
}

fn line_is_clear(map: &Map, from: Vector, to: Vector) -> bool {
    let line = bresenham(from, to);
    line.iter()
        .skip(1)
        .take(line.len().saturating_sub(2))
        .all(|&cell| !map.is_blocked(cell))
}

/// Cells on the Bresenham line from `from` to `to`, both ends included.
pub fn bresenham(from: Vector, to: Vector) -> Vec<Vector> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut cells = Vec::with_capacity((dx - dy) as usize + 1);
    let mut current = from;
    let mut err = dx + dy;
    loop {
        cells.push(current);
        if current == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            current.x += sx;
        }
        if e2 <= dx {
            err += dx;
            current.y += sy;
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bresenham_endpoints() {
        let line = bresenham(Vector::new(0, 0), Vector::new(4, 2));
        assert_eq!(line.first(), Some(&Vector::new(0, 0)));
        assert_eq!(line.last(), Some(&Vector::new(4, 2)));
        assert_eq!(line.len(), 5);

        let single = bresenham(Vector::new(3, 3), Vector::new(3, 3));
        assert_eq!(single, vec![Vector::new(3, 3)]);
    }

    #[test]
    fn test_walls_block_sight_but_are_lit() {
        let map = Map::from_rows(&[".....", "..x..", "....."]).unwrap();
        let origin = Vector::new(0, 1);
        assert!(in_sight(&map, origin, origin, 10));
        assert!(in_sight(&map, origin, Vector::new(2, 1), 10));
        assert!(!in_sight(&map, origin, Vector::new(4, 1), 10));
        assert!(in_sight(&map, origin, Vector::new(4, 0), 10));
    }

    #[test]
    fn test_radius_truncates_sight() {
        let map = Map::open(1, 10);
        let origin = Vector::new(0, 0);
        assert!(in_sight(&map, origin, Vector::new(3, 0), 3));
        assert!(!in_sight(&map, origin, Vector::new(4, 0), 3));
        assert!(!in_sight(&map, origin, Vector::new(-1, 0), 3));
    }
}
