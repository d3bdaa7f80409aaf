//! # Generation Module
//!
//! Procedural content for each level: the cave itself, the enemies that
//! live in it and the items placed on its floor.
//!
//! [`assemble_level`] ties these together into a playable [`World`](crate::World).

pub mod caves;
pub mod encounters;
pub mod items;
pub mod level;

pub use caves::*;
pub use encounters::*;
pub use items::*;
pub use level::*;

use crate::BurrowResult;
use rand::rngs::StdRng;

/// Core trait for procedural generators.
///
/// Generators draw all randomness from the supplied RNG so that a seed fully
/// determines their output.
pub trait Generator<T> {
    /// Generates content.
    fn generate(&self, rng: &mut StdRng) -> BurrowResult<T>;

    /// Checks that generated content is usable.
    fn validate(&self, content: &T) -> BurrowResult<()>;

    /// Name used in log output.
    fn generator_type(&self) -> &'static str;
}
