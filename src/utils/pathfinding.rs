//! # Pathfinding Algorithms
//!
//! Shortest cardinal paths over the cave map, used by every enemy strategy.

use crate::game::Map;
use crate::Vector;
use ::pathfinding::prelude::bfs;

/// The four cardinal steps, in the order the search expands them.
const CARDINALS: [Vector; 4] = [
    Vector::new(-1, 0),
    Vector::new(1, 0),
    Vector::new(0, 1),
    Vector::new(0, -1),
];

/// A traversability grid derived from the map and the solid entities on it.
///
/// # Examples
///
/// ```
/// use burrow::{Map, Pathfinder, Vector};
///
/// let map = Map::open(3, 3);
/// let pathfinder = Pathfinder::new(&map);
/// let path = pathfinder.path(Vector::new(0, 0), Vector::new(2, 2));
/// assert_eq!(path.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Pathfinder {
    width: i32,
    height: i32,
    passable: Vec<bool>,
}

impl Pathfinder {
    /// Builds a pathfinder where every floor cell is traversable.
    pub fn new(map: &Map) -> Self {
        let width = map.width() as i32;
        let height = map.height() as i32;
        let mut passable = Vec::with_capacity((width * height).max(0) as usize);
        for y in 0..height {
            for x in 0..width {
                passable.push(!map.is_blocked(Vector::new(x, y)));
            }
        }
        Self {
            width,
            height,
            passable,
        }
    }

    /// Marks a cell as untraversable. Off-map cells are ignored.
    pub fn block(&mut self, cell: Vector) {
        if let Some(index) = self.index(cell) {
            self.passable[index] = false;
        }
    }

    /// Whether a cell can be stepped on.
    pub fn is_passable(&self, cell: Vector) -> bool {
        self.index(cell).map(|i| self.passable[i]).unwrap_or(false)
    }

    /// Shortest cardinal path from `start` to `goal`, both included.
    ///
    /// An unreachable goal yields a path holding only `start`.
    pub fn path(&self, start: Vector, goal: Vector) -> Vec<Vector> {
        bfs(
            &start,
            |&cell| {
                CARDINALS
                    .iter()
                    .map(move |&step| cell + step)
                    .filter(|&next| self.is_passable(next))
                    .collect::<Vec<_>>()
            },
            |&cell| cell == goal,
        )
        .unwrap_or_else(|| vec![start])
    }

    /// The delta from `start` to the cell `distance` steps along the path to
    /// `goal`.
    ///
    /// Paths shorter than `distance` yield the delta to their final cell and
    /// a start-only path yields the zero vector.
    pub fn step_towards(&self, start: Vector, goal: Vector, distance: usize) -> Vector {
        let path = self.path(start, goal);
        if path.len() > distance {
            path[distance] - start
        } else if path.len() > 1 {
            path[path.len() - 1] - start
        } else {
            Vector::zero()
        }
    }

    fn index(&self, cell: Vector) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.width || cell.y >= self.height {
            None
        } else {
            Some((cell.y * self.width + cell.x) as usize)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_grid_path_length() {
        let map = Map::open(3, 3);
        let path = Pathfinder::new(&map).path(Vector::new(0, 0), Vector::new(2, 2));
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], Vector::new(0, 0));
        assert_eq!(path[4], Vector::new(2, 2));
        for pair in path.windows(2) {
            assert_eq!((pair[1] - pair[0]).manhattan(), 1);
        }
    }

    #[test]
    fn test_routes_around_walls() {
        let map = Map::from_rows(&["...", "xx.", "..."]).unwrap();
        let path = Pathfinder::new(&map).path(Vector::new(0, 0), Vector::new(0, 2));
        assert_eq!(path.len(), 7);
    }

    #[test]
    fn test_unreachable_goal_is_start_only() {
        let map = Map::from_rows(&[".x.", ".x.", ".x."]).unwrap();
        let pathfinder = Pathfinder::new(&map);
        let path = pathfinder.path(Vector::new(0, 0), Vector::new(2, 0));
        assert_eq!(path, vec![Vector::new(0, 0)]);
        assert_eq!(
            pathfinder.step_towards(Vector::new(0, 0), Vector::new(2, 0), 1),
            Vector::zero()
        );
    }

    #[test]
    fn test_step_towards_distance() {
        let map = Map::open(1, 5);
        let pathfinder = Pathfinder::new(&map);
        let start = Vector::new(0, 0);
        assert_eq!(pathfinder.step_towards(start, Vector::new(4, 0), 1), Vector::new(1, 0));
        assert_eq!(pathfinder.step_towards(start, Vector::new(4, 0), 2), Vector::new(2, 0));
        // Shorter than the requested distance: go to the end of the path.
        assert_eq!(pathfinder.step_towards(start, Vector::new(1, 0), 2), Vector::new(1, 0));
    }

    #[test]
    fn test_blocked_cells_are_avoided() {
        let map = Map::open(2, 3);
        let mut pathfinder = Pathfinder::new(&map);
        pathfinder.block(Vector::new(1, 0));
        let path = pathfinder.path(Vector::new(0, 0), Vector::new(2, 0));
        assert!(!path.contains(&Vector::new(1, 0)));
        assert_eq!(path.len(), 5);
    }
}
