//! # Cave Map
//!
//! The wall/floor grid for a single level.

use crate::{BoundingBox, BurrowError, BurrowResult, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D grid of booleans where `true` is an impassable wall and `false` is
/// open floor.
///
/// # Examples
///
/// ```
/// use burrow::{Map, Vector};
///
/// let map = Map::from_rows(&["x.x", "..."]).unwrap();
/// assert_eq!(map.height(), 2);
/// assert_eq!(map.width(), 3);
/// assert!(map.is_wall(Vector::new(0, 0)));
/// assert!(!map.is_wall(Vector::new(1, 0)));
/// assert!(map.is_blocked(Vector::new(5, 5))); // off-map counts as wall
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Map {
    /// Creates a map from row-major cells.
    pub fn from_cells(height: usize, width: usize, cells: Vec<bool>) -> BurrowResult<Self> {
        if cells.len() != height * width {
            return Err(BurrowError::InvalidState(format!(
                "map of {}x{} needs {} cells, got {}",
                height,
                width,
                height * width,
                cells.len()
            )));
        }
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Creates an all-floor map.
    pub fn open(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![false; height * width],
        }
    }

    /// Parses rows where `x` or `#` is a wall and anything else is floor.
    pub fn from_rows(rows: &[&str]) -> BurrowResult<Self> {
        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(height * width);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(BurrowError::InvalidState(format!(
                    "row {} has a different width than row 0",
                    y
                )));
            }
            cells.extend(row.chars().map(|c| c == 'x' || c == '#'));
        }
        Self::from_cells(height, width, cells)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The map bounds as a box from `(0, 0)` to `(width, height)`.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            Vector::new(0, 0),
            Vector::new(self.width as i32, self.height as i32),
        )
    }

    /// Whether `point` lies on the map.
    pub fn in_bounds(&self, point: Vector) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    /// The wall flag at `point`, or `None` off the map.
    pub fn get(&self, point: Vector) -> Option<bool> {
        if self.in_bounds(point) {
            Some(self.cells[point.y as usize * self.width + point.x as usize])
        } else {
            None
        }
    }

    /// Whether `point` is a wall. Off-map points are not walls; see
    /// [`Map::is_blocked`].
    pub fn is_wall(&self, point: Vector) -> bool {
        self.get(point).unwrap_or(false)
    }

    /// Whether `point` cannot be entered: a wall or off the map.
    pub fn is_blocked(&self, point: Vector) -> bool {
        self.get(point).unwrap_or(true)
    }

    /// Sets the wall flag at `point`. Off-map points are ignored.
    pub fn set(&mut self, point: Vector, wall: bool) {
        if self.in_bounds(point) {
            self.cells[point.y as usize * self.width + point.x as usize] = wall;
        }
    }

    /// Raw row-major cells.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// All floor cells in row-major order.
    pub fn floor_positions(&self) -> Vec<Vector> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &wall)| !wall)
            .map(|(i, _)| Vector::new((i % self.width) as i32, (i / self.width) as i32))
            .collect()
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|&&wall| wall).count()
    }
}

/// Renders walls as `x` and floor as `.`, one line per row.
impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for &wall in row {
                write!(f, "{}", if wall { 'x' } else { '.' })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_text() {
        let rows = ["x..x", "....", "xxxx"];
        let map = Map::from_rows(&rows).unwrap();
        assert_eq!(map.to_string(), rows.join("\n"));
        assert_eq!(map.wall_count(), 6);
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        assert!(Map::from_rows(&["...", ".."]).is_err());
        assert!(Map::from_cells(2, 2, vec![false; 3]).is_err());
    }

    #[test]
    fn test_floor_positions_are_row_major() {
        let map = Map::from_rows(&["x.", ".x"]).unwrap();
        assert_eq!(
            map.floor_positions(),
            vec![Vector::new(1, 0), Vector::new(0, 1)]
        );
    }

    #[test]
    fn test_bounds_and_blocking() {
        let map = Map::open(4, 6);
        assert_eq!(map.bounds(), BoundingBox::new(Vector::new(0, 0), Vector::new(6, 4)));
        assert!(!map.is_blocked(Vector::new(5, 3)));
        assert!(map.is_blocked(Vector::new(6, 3)));
        assert!(map.is_blocked(Vector::new(-1, 0)));
        assert!(!map.is_wall(Vector::new(-1, 0)));
    }
}
