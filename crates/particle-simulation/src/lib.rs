//! # Particle Simulation
//!
//! Steps the elevator box on the CPU and drives it frame by frame against
//! pluggable pointer and presentation collaborators.

pub mod frame;
pub mod pointer;
pub mod simulation;

pub use frame::*;
pub use pointer::*;
pub use simulation::*;
