//! Particle state and the fixed-size particle store

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Per-particle kinematic state plus display color.
/// Laid out flat so positions can be uploaded without conversion.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Position in normalized canvas coordinates (y up)
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    /// Acceleration applied during the most recent step
    pub acceleration: [f32; 2],
    /// Packed 0xRRGGBB
    pub color: u32,
}

impl Particle {
    /// Create a particle at rest
    pub fn new(position: Vec2, color: u32) -> Self {
        Self {
            position: position.to_array(),
            color,
            ..Self::default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity.to_array();
        self
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        Vec2::from_array(self.velocity)
    }

    #[inline]
    pub fn acc(&self) -> Vec2 {
        Vec2::from_array(self.acceleration)
    }

    #[inline]
    pub fn set_pos(&mut self, position: Vec2) {
        self.position = position.to_array();
    }

    #[inline]
    pub fn set_vel(&mut self, velocity: Vec2) {
        self.velocity = velocity.to_array();
    }

    #[inline]
    pub fn set_acc(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration.to_array();
    }
}

/// Owns every particle for the lifetime of a run.
///
/// Indices are stable: the population never grows or shrinks after
/// construction, only [`ParticleStore::reinitialize`] rewrites it in place.
#[derive(Clone, Debug)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    seed: u64,
}

impl ParticleStore {
    /// Randomly populate `count` particles.
    ///
    /// Positions land in [0,2)×[0,2), so most particles start outside the
    /// visible box and are clamped in by the first step's wall pass.
    /// `None` picks a fresh seed from the thread RNG.
    pub fn initialize(count: usize, seed: Option<u64>) -> Self {
        let mut store = Self {
            particles: vec![Particle::default(); count],
            seed: 0,
        };
        store.reinitialize(seed);
        store
    }

    /// Wrap a hand-placed population
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles, seed: 0 }
    }

    /// Re-randomize every particle without changing the population size
    pub fn reinitialize(&mut self, seed: Option<u64>) {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);

        for p in self.particles.iter_mut() {
            let position = Vec2::new(rng.random::<f32>() * 2.0, rng.random::<f32>() * 2.0);
            let velocity = Vec2::new(rng.random::<f32>() * 2.0, rng.random::<f32>() * 2.0) * 0.5;
            let color = rng.random_range(0..=0x00ff_ffff_u32);
            *p = Particle::new(position, color).with_velocity(velocity);
        }

        self.seed = seed;
        log::info!(
            "Initialized {} particles (seed {})",
            self.particles.len(),
            seed
        );
    }

    /// Seed used by the last random initialization (0 for hand-placed stores)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_ranges() {
        let store = ParticleStore::initialize(500, Some(7));
        assert_eq!(store.len(), 500);

        for p in store.particles() {
            assert!(p.position.iter().all(|&x| (0.0..2.0).contains(&x)));
            assert!(p.velocity.iter().all(|&v| (0.0..1.0).contains(&v)));
            assert_eq!(p.acceleration, [0.0, 0.0]);
            assert!(p.color <= 0xff_ffff);
        }
    }

    #[test]
    fn test_initialize_spills_outside_unit_box() {
        // Roughly three quarters of uniform [0,2)² samples fall outside [0,1]²
        let store = ParticleStore::initialize(200, Some(3));
        let outside = store
            .particles()
            .iter()
            .filter(|p| p.position[0] > 1.0 || p.position[1] > 1.0)
            .count();
        assert!(outside > 100);
    }

    #[test]
    fn test_seeded_initialize_is_reproducible() {
        let a = ParticleStore::initialize(64, Some(42));
        let b = ParticleStore::initialize(64, Some(42));
        let c = ParticleStore::initialize(64, Some(43));
        assert_eq!(a.particles(), b.particles());
        assert_ne!(a.particles(), c.particles());
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_reinitialize_keeps_population() {
        let mut store = ParticleStore::initialize(16, Some(1));
        let before = store.particles().to_vec();
        store.reinitialize(Some(2));
        assert_eq!(store.len(), 16);
        assert_ne!(store.particles(), &before[..]);
        assert_eq!(store.seed(), 2);
    }

    #[test]
    fn test_particle_accessors() {
        let mut p = Particle::new(Vec2::new(0.25, 0.75), 0x123456).with_velocity(Vec2::X);
        assert_eq!(p.pos(), Vec2::new(0.25, 0.75));
        assert_eq!(p.vel(), Vec2::X);
        p.set_acc(Vec2::new(0.0, -9.8));
        assert_eq!(p.acceleration, [0.0, -9.8]);
        assert_eq!(std::mem::size_of::<Particle>(), 28);
    }
}
