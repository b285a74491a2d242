//! # Particle Physics
//!
//! CPU physics for the elevator box: a fixed population of equal circles in a
//! unit square, pushed up inside the elevator strip and pulled down by
//! gravity elsewhere, bouncing off each other and the walls.

pub mod collision;
pub mod constants;
pub mod forces;
pub mod params;
pub mod particle;

pub use collision::*;
pub use constants::*;
pub use forces::*;
pub use params::*;
pub use particle::*;
