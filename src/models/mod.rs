//! Row-shaped entities persisted in the store.

pub mod palette;
pub mod project;

pub use palette::{filter_by_color, ColorSlot, Palette};
pub use project::Project;
