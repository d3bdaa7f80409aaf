//! # Burrow
//!
//! A turn-based cave roguelike where the things you kill become the things
//! you are.
//!
//! ## Architecture Overview
//!
//! Burrow separates the deterministic simulation from everything that talks
//! to the screen:
//!
//! - **Game State**: the session object running the per-turn protocol
//! - **World**: entity records with typed components, capability tags and a
//!   spatial index over a cave map
//! - **AI**: one state machine per enemy archetype, driven by field of view
//!   and pathfinding
//! - **Generation**: cellular-automaton caves and level assembly
//! - **Rendering and Scenes**: macroquad front end, kept out of the
//!   simulation entirely
//!
//! Every random choice flows from one seeded RNG, so a seed and a sequence of
//! inputs reproduce a whole game.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod settings;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use settings::*;
pub use utils::*;

pub use scenes::{Scene, SceneManager};

/// Core error type for the Burrow game engine.
#[derive(thiserror::Error, Debug)]
pub enum BurrowError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Settings are missing or inconsistent
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An enemy reached its turn without a strategy attached
    #[error("Enemy {name} has no strategy")]
    MissingStrategy { name: String },

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A box cannot be placed where it was asked to go
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// An entity id no longer refers to a live record
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Burrow codebase.
pub type BurrowResult<T> = Result<T, BurrowError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Enemies of each configured kind placed on every level
    pub const ENEMIES_PER_KIND: usize = 10;

    /// Per-depth multiplier applied to enemy stats
    pub const DEPTH_SCALING: f64 = 1.3;

    /// Upper bound on cave automaton passes
    pub const MAX_GENERATIONS: usize = 10;

    /// Leading passes that also fill sparse open areas
    pub const SMOOTHING_GENERATIONS: usize = 3;

    /// Attempts at assembling a level before giving up
    pub const MAX_LEVEL_ATTEMPTS: u32 = 10;

    /// Messages kept in the log
    pub const MAX_MESSAGES: usize = 100;

    /// Frames per second target for the game loop
    pub const TARGET_FPS: u64 = 60;
}
