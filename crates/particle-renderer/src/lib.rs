//! # Particle Renderer
//!
//! wgpu presentation for the elevator box: instanced circles plus a
//! rectangle outline marking the elevator strip.

pub mod canvas;
pub mod color;
pub mod overlay;
pub mod renderer;

pub use canvas::*;
pub use color::*;
pub use overlay::*;
pub use renderer::*;
