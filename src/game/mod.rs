//! # Game Module
//!
//! Core simulation: the cave map, the entity store, enemy AI and the turn
//! pipeline that ties them together.
//!
//! This module contains the fundamental building blocks of Burrow:
//! - Session state and the per-turn protocol
//! - Map and world representation with a spatial index
//! - Typed components and capability tags
//! - Per-archetype enemy strategies

pub mod ai;
pub mod components;
pub mod map;
pub mod messages;
pub mod state;
pub mod systems;
pub mod world;

pub use ai::*;
pub use components::*;
pub use map::*;
pub use messages::*;
pub use state::*;
pub use systems::*;
pub use world::*;

use crate::Vector;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directions for movement, plus staying put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
    /// Rest in place
    Wait,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Direction, Vector};
    ///
    /// assert_eq!(Direction::North.to_delta(), Vector::new(0, -1));
    /// assert!(Direction::Wait.to_delta().is_zero());
    /// ```
    pub fn to_delta(self) -> Vector {
        match self {
            Direction::North => Vector::new(0, -1),
            Direction::South => Vector::new(0, 1),
            Direction::East => Vector::new(1, 0),
            Direction::West => Vector::new(-1, 0),
            Direction::Northeast => Vector::new(1, -1),
            Direction::Northwest => Vector::new(-1, -1),
            Direction::Southeast => Vector::new(1, 1),
            Direction::Southwest => Vector::new(-1, 1),
            Direction::Wait => Vector::zero(),
        }
    }

    /// Converts a position delta to a direction.
    ///
    /// Returns None if the delta is not a single step.
    pub fn from_delta(delta: Vector) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            (1, -1) => Some(Direction::Northeast),
            (-1, -1) => Some(Direction::Northwest),
            (1, 1) => Some(Direction::Southeast),
            (-1, 1) => Some(Direction::Southwest),
            (0, 0) => Some(Direction::Wait),
            _ => None,
        }
    }

    /// Returns only the 4 cardinal directions.
    pub fn cardinal() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

/// Creates a new entity ID from `rng`, so seeded sessions hand out the same
/// identities.
pub fn new_entity_id<R: Rng + ?Sized>(rng: &mut R) -> EntityId {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}
