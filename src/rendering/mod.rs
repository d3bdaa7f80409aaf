//! # Rendering Module
//!
//! Macroquad front end. Reads the game state once per frame and draws it.

pub mod display;

pub use display::*;
