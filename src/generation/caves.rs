//! # Cave Generation
//!
//! Cellular-automaton caves. A random wall field is smoothed for up to
//! [`MAX_GENERATIONS`](crate::config::MAX_GENERATIONS) passes: the first
//! passes also fill large empty areas using a wider neighborhood, the later
//! ones apply the plain 4-5 rule until the map stops changing.

use crate::config::{MAX_GENERATIONS, SMOOTHING_GENERATIONS};
use crate::{BurrowError, BurrowResult, Generator, Map};
use rand::rngs::StdRng;
use rand::Rng;

/// Parameters for one cave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaveGenerator {
    pub height: usize,
    pub width: usize,
    /// Probability that a seed cell starts as wall; 0.4 to 0.6 works best
    pub wall_threshold: f64,
    /// Whether the area beyond the map edge counts as wall
    pub closed: bool,
}

/// A generated map along with how the automaton terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cave {
    pub map: Map,
    /// Number of smoothing passes that ran
    pub passes: usize,
    /// Whether the last pass left the map unchanged
    pub converged: bool,
}

impl CaveGenerator {
    pub fn new(height: usize, width: usize, wall_threshold: f64, closed: bool) -> Self {
        Self {
            height,
            width,
            wall_threshold,
            closed,
        }
    }

    /// The random starting field: each cell is a wall with probability
    /// `wall_threshold`.
    pub fn seed(&self, rng: &mut StdRng) -> Map {
        let cells = (0..self.height * self.width)
            .map(|_| rng.gen::<f64>() <= self.wall_threshold)
            .collect();
        Map::from_cells(self.height, self.width, cells).unwrap_or_else(|_| Map::open(0, 0))
    }

    /// Seeds and smooths a cave.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::CaveGenerator;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let generator = CaveGenerator::new(20, 40, 0.45, true);
    /// let cave = generator.carve(&mut StdRng::seed_from_u64(1));
    /// assert!(cave.passes <= 10);
    /// assert_eq!(cave.map.width(), 40);
    /// ```
    pub fn carve(&self, rng: &mut StdRng) -> Cave {
        let mut map = self.seed(rng);
        let mut passes = 0;
        let mut converged = false;
        while !converged && passes < MAX_GENERATIONS {
            let next = generation_step(&map, self.closed, passes);
            converged = next == map;
            map = next;
            passes += 1;
        }
        log::debug!(
            "carved {}x{} cave in {} passes (converged: {})",
            self.width,
            self.height,
            passes,
            converged
        );
        Cave {
            map,
            passes,
            converged,
        }
    }
}

impl Generator<Map> for CaveGenerator {
    fn generate(&self, rng: &mut StdRng) -> BurrowResult<Map> {
        self.validate_parameters()?;
        Ok(self.carve(rng).map)
    }

    fn validate(&self, content: &Map) -> BurrowResult<()> {
        if content.height() != self.height || content.width() != self.width {
            return Err(BurrowError::GenerationFailed(format!(
                "cave is {}x{}, expected {}x{}",
                content.width(),
                content.height(),
                self.width,
                self.height
            )));
        }
        if content.floor_positions().is_empty() {
            return Err(BurrowError::GenerationFailed(
                "cave has no open floor".to_string(),
            ));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "CaveGenerator"
    }
}

impl CaveGenerator {
    fn validate_parameters(&self) -> BurrowResult<()> {
        if self.height == 0 || self.width == 0 {
            return Err(BurrowError::Configuration(format!(
                "cave of {}x{} has no cells",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.wall_threshold) {
            return Err(BurrowError::Configuration(format!(
                "wall threshold {} is not a probability",
                self.wall_threshold
            )));
        }
        Ok(())
    }
}

/// Runs one smoothing pass over `map`.
///
/// `pass` is the zero-based index of this pass; the first
/// [`SMOOTHING_GENERATIONS`] passes also turn into wall any cell whose wider
/// neighborhood holds fewer than two walls. Cells beyond the edge count as
/// walls when `closed` is set.
pub fn generation_step(map: &Map, closed: bool, pass: usize) -> Map {
    let height = map.height() as i32;
    let width = map.width() as i32;
    let wall_at = |x: i32, y: i32| -> usize {
        if x < 0 || y < 0 || x >= width || y >= height {
            usize::from(closed)
        } else {
            usize::from(map.cells()[(y * width + x) as usize])
        }
    };

    let wide = pass < SMOOTHING_GENERATIONS;
    let mut cells = Vec::with_capacity(map.cells().len());
    for y in 0..height {
        for x in 0..width {
            let mut near = 0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    near += wall_at(x + dx, y + dy);
                }
            }
            let wall = if wide {
                near > 4 || far_count(&wall_at, x, y) < 2
            } else {
                near > 4
            };
            cells.push(wall);
        }
    }
    Map::from_cells(map.height(), map.width(), cells).unwrap_or_else(|_| map.clone())
}

/// Walls in the 4x4 window spanning rows `y-2..=y+1` and columns
/// `x-2..=x+1`. The first row and column always report one.
fn far_count(wall_at: &impl Fn(i32, i32) -> usize, x: i32, y: i32) -> usize {
    if x == 0 || y == 0 {
        return 1;
    }
    let mut far = 0;
    for fy in y - 2..=y + 1 {
        for fx in x - 2..=x + 1 {
            far += wall_at(fx, fy);
        }
    }
    far
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_same_seed_same_cave() {
        let generator = CaveGenerator::new(30, 50, 0.45, true);
        let a = generator.carve(&mut StdRng::seed_from_u64(99));
        let b = generator.carve(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_pass_cap() {
        for seed in 0..20 {
            let cave =
                CaveGenerator::new(25, 40, 0.5, true).carve(&mut StdRng::seed_from_u64(seed));
            assert!(cave.passes >= 1 && cave.passes <= MAX_GENERATIONS);
            if cave.passes < MAX_GENERATIONS {
                assert!(cave.converged);
            }
        }
    }

    #[test]
    fn test_converged_cave_is_a_fixed_point() {
        for seed in 0..20 {
            let cave =
                CaveGenerator::new(25, 40, 0.45, true).carve(&mut StdRng::seed_from_u64(seed));
            if cave.converged {
                let again = generation_step(&cave.map, true, cave.passes - 1);
                assert_eq!(again, cave.map);
            }
        }
    }

    #[test]
    fn test_dense_neighborhood_becomes_wall() {
        let map = Map::from_rows(&["xxx", "x.x", "xxx"]).unwrap();
        let next = generation_step(&map, true, SMOOTHING_GENERATIONS);
        assert!(next.is_wall(crate::Vector::new(1, 1)));
    }

    #[test]
    fn test_open_edges_clear_sparse_cells() {
        let map = Map::from_rows(&["....", ".x..", "....", "...."]).unwrap();
        let next = generation_step(&map, false, SMOOTHING_GENERATIONS);
        assert_eq!(next.wall_count(), 0);
    }

    #[test]
    fn test_far_rule_fills_empty_interior() {
        // The first row and column report a far count of one, so they fill
        // along with the empty interior.
        let map = Map::open(5, 5);
        let next = generation_step(&map, false, 0);
        assert!(next.is_wall(crate::Vector::new(2, 2)));
        assert!(next.is_wall(crate::Vector::new(0, 2)));
        assert!(next.is_wall(crate::Vector::new(2, 0)));
        assert_eq!(next.wall_count(), 25);

        let later = generation_step(&map, false, SMOOTHING_GENERATIONS);
        assert_eq!(later.wall_count(), 0);
    }

    #[test]
    fn test_closed_edges_count_as_walls() {
        let map = Map::open(3, 3);
        let next = generation_step(&map, true, SMOOTHING_GENERATIONS);
        // A corner sees five border walls.
        assert!(next.is_wall(crate::Vector::new(0, 0)));
        assert!(!next.is_wall(crate::Vector::new(1, 1)));
    }

    #[test]
    fn test_generator_rejects_bad_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(CaveGenerator::new(0, 10, 0.5, true).generate(&mut rng).is_err());
        assert!(CaveGenerator::new(10, 10, 1.5, true).generate(&mut rng).is_err());
        let map = CaveGenerator::new(10, 12, 0.45, true).generate(&mut rng).unwrap();
        assert_eq!(map.height(), 10);
    }
}
