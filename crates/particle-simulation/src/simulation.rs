//! CPU particle simulation manager
//!
//! One call to [`ParticleSimulation::step`] is one fixed timestep over the
//! whole population. Integration and collision are fused per particle:
//! particle `i` is integrated, then resolved against every `j < i`, then
//! against the walls. Later particles see positions already moved earlier
//! in the same pass; the asymmetry is intentional and keeps the step a
//! single sequential sweep. A final clamp-only sweep restores containment
//! for particles pushed back past a wall by a later pair correction.

use glam::Vec2;
use particle_physics::{
    apply_pointer_force, clamp_to_bounds, integrate, resolve_against_lower, within_pointer,
    CollisionStats, Particle, ParticleStore, WorldParams, HOVER_COLOR,
};

/// CPU particle simulation
pub struct ParticleSimulation {
    store: ParticleStore,
    params: WorldParams,
    steps: u64,
}

impl ParticleSimulation {
    /// Randomly populate `params.particle_count` particles
    pub fn new(params: WorldParams, seed: Option<u64>) -> Self {
        log::info!("Initializing ParticleSimulation...");
        let store = ParticleStore::initialize(params.particle_count, seed);
        Self::with_store(params, store)
    }

    /// Simulate a hand-built population. `params.particle_count` is
    /// overwritten with the store's size.
    pub fn with_store(params: WorldParams, store: ParticleStore) -> Self {
        let params = params.with_particle_count(store.len());
        log::debug!(
            "World: {} particles, radius {:.4}, dt {}, damping {}",
            params.particle_count,
            params.particle_radius,
            params.dt,
            params.damping
        );
        Self {
            store,
            params,
            steps: 0,
        }
    }

    /// Advance every particle by one timestep
    pub fn step(&mut self) -> CollisionStats {
        let params = self.params;
        let particles = self.store.particles_mut();
        let mut stats = CollisionStats::default();

        for i in 0..particles.len() {
            integrate(&mut particles[i], &params);
            resolve_against_lower(particles, i, &params, &mut stats);
        }

        for p in particles.iter_mut() {
            if clamp_to_bounds(p, &params) {
                stats.late_clamps += 1;
            }
        }

        self.steps += 1;
        if stats.degenerate > 0 || stats.late_clamps > 0 {
            log::debug!(
                "Step {}: skipped {} coincident pairs, re-clamped {} particles",
                self.steps,
                stats.degenerate,
                stats.late_clamps
            );
        }
        stats
    }

    /// Kick particles near the pointer. Returns how many were touched.
    pub fn apply_pointer(&mut self, pointer: Vec2, pointer_velocity: Vec2) -> usize {
        apply_pointer_force(
            self.store.particles_mut(),
            pointer,
            pointer_velocity,
            &self.params,
        )
    }

    /// Fill `out` with display colors, painting particles under the pointer red.
    /// Particle state is not modified.
    pub fn display_colors(&self, pointer: Vec2, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.store.particles().iter().map(|p| {
            if within_pointer(p.pos(), pointer, &self.params) {
                HOVER_COLOR
            } else {
                p.color
            }
        }));
    }

    /// Fill `out` with particle centers
    pub fn positions(&self, out: &mut Vec<[f32; 2]>) {
        out.clear();
        out.extend(self.store.particles().iter().map(|p| p.position));
    }

    /// Re-randomize the population in place
    pub fn reset(&mut self, seed: Option<u64>) {
        self.store.reinitialize(seed);
        self.steps = 0;
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.particles()
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn seed(&self) -> u64 {
        self.store.seed()
    }
}
