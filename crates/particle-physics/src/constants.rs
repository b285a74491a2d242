//! Default world constants for the elevator box
//!
//! All lengths are fractions of the canvas width so the physics runs in a
//! normalized [0,1]×[0,1] domain. Accelerations are in canvas widths per
//! second squared.

/// Canvas edge length in pixels (the window is square)
pub const CANVAS_SIZE: u32 = 1024;

/// Particle radius in pixels at the default canvas size
pub const PARTICLE_RADIUS_PX: f32 = 15.0;

/// Particle radius as a fraction of the canvas width
pub const PARTICLE_RADIUS: f32 = PARTICLE_RADIUS_PX / CANVAS_SIZE as f32;

/// Number of particles in the box
pub const PARTICLE_COUNT: usize = 100;

/// Fixed integration timestep
pub const DT: f32 = 0.01;

/// Restitution applied to particle-particle impulses and wall bounces
pub const DAMPING: f32 = 0.8;

/// Pointer interaction radius, in particle radii
pub const POINTER_SIZE_FACTOR: f32 = 2.0;

/// Multiplier from pointer speed to velocity kick
pub const POINTER_FORCE_SCALE: f32 = 30.0;

/// Width of the elevator strip at the left edge
pub const ELEVATOR_FRACTION: f32 = 0.2;

/// Upward acceleration inside the elevator strip
pub const ELEVATOR_ACCELERATION: f32 = 2.0;

/// Downward acceleration everywhere else
pub const GRAVITY: f32 = -9.8;

/// Separations below this are treated as coincident; no normal can be formed
pub const SEPARATION_EPSILON: f32 = 1.0e-6;

/// Display color for particles under the pointer
pub const HOVER_COLOR: u32 = 0xff0000;

/// Outline color of the elevator strip overlay
pub const ELEVATOR_COLOR: u32 = 0xffff00;
