//! Output helpers

pub mod display;
pub mod render;

pub use display::{SolutionFormatter, ColorOutput, Color};
pub use render::{render_grid, save_png};
