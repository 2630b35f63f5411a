pub mod renderer;

pub use renderer::{CellGeometry, Renderer};
