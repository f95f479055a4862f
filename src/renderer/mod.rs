//! Rendering module
//!
//! Draws the world into a character-cell canvas; the platform presents it.

pub mod canvas;
pub mod scene;

pub use canvas::{Canvas, CellRect};
pub use scene::{RunCycle, draw_world};
