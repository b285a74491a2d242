//! World configuration shared by every physics routine

use crate::constants::*;

/// Immutable world configuration, set once per run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldParams {
    /// Canvas edge length in pixels; only used to size particles on screen
    pub canvas_size: u32,
    /// Particle radius as a fraction of the canvas width
    pub particle_radius: f32,
    pub particle_count: usize,
    pub dt: f32,
    /// Restitution in (0, 1]; 1.0 is perfectly elastic
    pub damping: f32,
    pub elevator_fraction: f32,
    pub elevator_acceleration: f32,
    /// Negative values pull toward y = 0
    pub gravity: f32,
    pub pointer_size_factor: f32,
    pub pointer_force_scale: f32,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            canvas_size: CANVAS_SIZE,
            particle_radius: PARTICLE_RADIUS,
            particle_count: PARTICLE_COUNT,
            dt: DT,
            damping: DAMPING,
            elevator_fraction: ELEVATOR_FRACTION,
            elevator_acceleration: ELEVATOR_ACCELERATION,
            gravity: GRAVITY,
            pointer_size_factor: POINTER_SIZE_FACTOR,
            pointer_force_scale: POINTER_FORCE_SCALE,
        }
    }
}

impl WorldParams {
    /// Same world with a different population size
    pub fn with_particle_count(self, particle_count: usize) -> Self {
        Self {
            particle_count,
            ..self
        }
    }

    /// Same world with both the elevator and gravity switched off
    pub fn without_body_forces(self) -> Self {
        Self {
            elevator_acceleration: 0.0,
            gravity: 0.0,
            ..self
        }
    }

    /// Center distance at which two particles start to overlap
    #[inline]
    pub fn contact_distance(&self) -> f32 {
        2.0 * self.particle_radius
    }

    /// Distance from the pointer inside which particles are pushed
    #[inline]
    pub fn pointer_radius(&self) -> f32 {
        self.particle_radius * self.pointer_size_factor
    }

    /// Lowest legal coordinate on either axis
    #[inline]
    pub fn min_coord(&self) -> f32 {
        self.particle_radius
    }

    /// Highest legal coordinate on either axis
    #[inline]
    pub fn max_coord(&self) -> f32 {
        1.0 - self.particle_radius
    }

    /// Particle radius in pixels for a canvas of `canvas_px` pixels
    pub fn radius_px(&self, canvas_px: u32) -> f32 {
        self.particle_radius * canvas_px as f32
    }
}
