//! # Utilities Module
//!
//! Geometry, field of view and pathfinding shared by generation and AI.

pub mod fov;
pub mod geometry;
pub mod pathfinding;

pub use self::fov::*;
pub use self::geometry::*;
pub use self::pathfinding::Pathfinder;
