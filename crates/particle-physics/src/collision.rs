//! Circle-circle and circle-wall contact resolution
//!
//! Single pass, order dependent: a pair's positional push-apart is applied
//! immediately and later pairs see the moved positions.

use crate::constants::SEPARATION_EPSILON;
use crate::params::WorldParams;
use crate::particle::Particle;
use glam::Vec2;

/// Outcome of checking one particle pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Centers are at least one diameter apart
    Separated,
    /// Centers coincide; no normal exists so the pair was left alone
    Degenerate,
    /// Pair was pushed apart. `impulse` is zero when they were already separating.
    Resolved { overlap: f32, impulse: f32 },
}

/// Resolve an overlap between `a` and `b`.
///
/// Both particles are pushed apart by half the overlap along the contact
/// normal, which leaves their centers exactly one diameter apart. If they
/// are approaching, an impulse of `damping * closing speed` is exchanged
/// along the normal.
pub fn resolve_pair(a: &mut Particle, b: &mut Particle, params: &WorldParams) -> Contact {
    let offset = a.pos() - b.pos();
    let distance = offset.length();
    let contact_distance = params.contact_distance();

    if distance >= contact_distance {
        return Contact::Separated;
    }
    if distance < SEPARATION_EPSILON {
        return Contact::Degenerate;
    }

    let normal = offset / distance;
    let vel_along_normal = (a.vel() - b.vel()).dot(normal);

    let overlap = contact_distance - distance;
    let correction = normal * (overlap / 2.0);
    a.set_pos(a.pos() + correction);
    b.set_pos(b.pos() - correction);

    let mut impulse = 0.0;
    if vel_along_normal < 0.0 {
        impulse = -params.damping * vel_along_normal;
        a.set_vel(a.vel() + normal * impulse);
        b.set_vel(b.vel() - normal * impulse);
    }

    Contact::Resolved { overlap, impulse }
}

/// Bounce `particle` off the canvas walls, x axis then y axis.
///
/// Returns true if any wall was touched.
pub fn resolve_walls(particle: &mut Particle, params: &WorldParams) -> bool {
    let (lo, hi) = (params.min_coord(), params.max_coord());
    let mut hit = false;

    for axis in 0..2 {
        let p = particle.position[axis];
        if p < lo || p > hi {
            particle.velocity[axis] *= -params.damping;
            particle.position[axis] = p.clamp(lo, hi);
            hit = true;
        }
    }

    hit
}

/// Clamp `particle` into the legal box without touching its velocity.
///
/// Used after a full pass: a particle that already bounced off a wall can be
/// pushed back out by a later pair correction in the same step.
pub fn clamp_to_bounds(particle: &mut Particle, params: &WorldParams) -> bool {
    let (lo, hi) = (params.min_coord(), params.max_coord());
    let before = particle.position;
    particle.position = before.map(|p| p.clamp(lo, hi));
    particle.position != before
}

/// Running totals over one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionStats {
    pub contacts: usize,
    pub impulses: usize,
    pub degenerate: usize,
    pub wall_hits: usize,
    /// Particles re-clamped by the end-of-step containment sweep
    pub late_clamps: usize,
}

impl CollisionStats {
    pub fn record(&mut self, contact: Contact) {
        match contact {
            Contact::Separated => {}
            Contact::Degenerate => self.degenerate += 1,
            Contact::Resolved { impulse, .. } => {
                self.contacts += 1;
                if impulse > 0.0 {
                    self.impulses += 1;
                }
            }
        }
    }
}

/// Resolve particle `index` against every lower-indexed particle, then
/// against the walls.
///
/// Callers are expected to have integrated `index` already. Panics if
/// `index` is out of bounds.
pub fn resolve_against_lower(
    particles: &mut [Particle],
    index: usize,
    params: &WorldParams,
    stats: &mut CollisionStats,
) {
    let (lower, rest) = particles.split_at_mut(index);
    let current = &mut rest[0];

    for (j, other) in lower.iter_mut().enumerate() {
        let contact = resolve_pair(current, other, params);
        if contact == Contact::Degenerate {
            log::trace!("Skipping coincident pair ({}, {})", index, j);
        }
        stats.record(contact);
    }

    if resolve_walls(current, params) {
        stats.wall_hits += 1;
    }
}

/// Check the containment invariant for one position
pub fn in_bounds(position: Vec2, params: &WorldParams) -> bool {
    let (lo, hi) = (params.min_coord(), params.max_coord());
    (lo..=hi).contains(&position.x) && (lo..=hi).contains(&position.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-6;

    fn params() -> WorldParams {
        WorldParams::default().without_body_forces()
    }

    #[test]
    fn test_separated_pair_untouched() {
        let params = params();
        let mut a = Particle::new(Vec2::new(0.5, 0.5), 0);
        let mut b = Particle::new(Vec2::new(0.5 + params.contact_distance(), 0.5), 0);
        assert_eq!(resolve_pair(&mut a, &mut b, &params), Contact::Separated);
        assert_eq!(a.pos(), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_overlap_pushed_to_contact_distance() {
        let params = params();
        let r = params.particle_radius;
        let mut a = Particle::new(Vec2::new(0.5, 0.5), 0).with_velocity(Vec2::new(0.3, -0.1));
        let mut b = Particle::new(Vec2::new(0.5 + 0.4 * r, 0.5 + 0.3 * r), 0)
            .with_velocity(Vec2::new(-0.2, 0.7));

        let contact = resolve_pair(&mut a, &mut b, &params);

        assert!(matches!(contact, Contact::Resolved { .. }));
        let separation = a.pos().distance(b.pos());
        assert!((separation - 2.0 * r).abs() < EPS);
    }

    #[test]
    fn test_push_apart_is_symmetric() {
        let params = params();
        let r = params.particle_radius;
        let mut a = Particle::new(Vec2::new(0.5, 0.5), 0);
        let mut b = Particle::new(Vec2::new(0.5 + r, 0.5), 0);
        let midpoint = (a.pos() + b.pos()) / 2.0;

        resolve_pair(&mut a, &mut b, &params);

        assert!((((a.pos() + b.pos()) / 2.0) - midpoint).length() < EPS);
        // Normal points from b to a
        assert!(a.pos().x < 0.5);
        assert!(b.pos().x > 0.5 + r);
    }

    #[test]
    fn test_approaching_pair_gets_damped_impulse() {
        let params = params();
        let r = params.particle_radius;
        // a is to the right of b and moving left; b is moving right
        let mut a = Particle::new(Vec2::new(0.5 + r, 0.5), 0).with_velocity(Vec2::new(-1.0, 0.0));
        let mut b = Particle::new(Vec2::new(0.5, 0.5), 0).with_velocity(Vec2::new(1.0, 0.0));

        let contact = resolve_pair(&mut a, &mut b, &params);

        // Closing speed along +x normal is -2
        let impulse = params.damping * 2.0;
        assert_eq!(
            contact,
            Contact::Resolved {
                overlap: r,
                impulse
            }
        );
        assert!((a.vel().x - (-1.0 + impulse)).abs() < EPS);
        assert!((b.vel().x - (1.0 - impulse)).abs() < EPS);
    }

    #[test]
    fn test_impulse_never_adds_energy() {
        let params = params();
        let r = params.particle_radius;
        let mut a = Particle::new(Vec2::new(0.5 + r, 0.5), 0).with_velocity(Vec2::new(-1.0, 0.2));
        let mut b = Particle::new(Vec2::new(0.5, 0.5), 0).with_velocity(Vec2::new(0.5, -0.3));

        let before = (a.vel() - b.vel()).dot(Vec2::X);
        let energy_before = a.vel().length_squared() + b.vel().length_squared();
        resolve_pair(&mut a, &mut b, &params);
        let after = (a.vel() - b.vel()).dot(Vec2::X);
        let energy_after = a.vel().length_squared() + b.vel().length_squared();

        assert!(before < 0.0);
        // With damping 0.8 the closing speed becomes (1 - 2*0.8) * before
        assert!((after - (1.0 - 2.0 * params.damping) * before).abs() < 1.0e-5);
        assert!(energy_after <= energy_before + EPS);
    }

    #[test]
    fn test_separating_pair_gets_no_impulse() {
        let params = params();
        let r = params.particle_radius;
        let mut a = Particle::new(Vec2::new(0.5 + r, 0.5), 0).with_velocity(Vec2::new(1.0, 0.0));
        let mut b = Particle::new(Vec2::new(0.5, 0.5), 0).with_velocity(Vec2::new(-1.0, 0.0));

        let contact = resolve_pair(&mut a, &mut b, &params);

        assert_eq!(
            contact,
            Contact::Resolved {
                overlap: r,
                impulse: 0.0
            }
        );
        assert_eq!(a.vel(), Vec2::new(1.0, 0.0));
        assert_eq!(b.vel(), Vec2::new(-1.0, 0.0));
        // Still pushed apart
        assert!((a.pos().distance(b.pos()) - 2.0 * r).abs() < EPS);
    }

    #[test]
    fn test_coincident_pair_is_skipped() {
        let params = params();
        let mut a = Particle::new(Vec2::new(0.5, 0.5), 0).with_velocity(Vec2::X);
        let mut b = Particle::new(Vec2::new(0.5, 0.5), 0);

        assert_eq!(resolve_pair(&mut a, &mut b, &params), Contact::Degenerate);
        assert_eq!(a.pos(), b.pos());
        assert_eq!(a.vel(), Vec2::X);
    }

    #[test]
    fn test_left_wall_reflects_and_clamps() {
        let params = params();
        let mut p = Particle::new(Vec2::new(0.001, 0.5), 0).with_velocity(Vec2::new(-0.5, 0.1));

        assert!(resolve_walls(&mut p, &params));

        assert_eq!(p.position[0], params.particle_radius);
        assert_eq!(p.velocity[0], -params.damping * -0.5);
        // The other axis is untouched
        assert_eq!(p.position[1], 0.5);
        assert_eq!(p.velocity[1], 0.1);
    }

    #[test]
    fn test_far_corner_clamps_both_axes() {
        let params = params();
        let mut p = Particle::new(Vec2::new(1.7, 1.2), 0).with_velocity(Vec2::new(0.4, 0.6));

        assert!(resolve_walls(&mut p, &params));

        assert_eq!(p.pos(), Vec2::splat(params.max_coord()));
        assert!((p.vel() - Vec2::new(-0.32, -0.48)).length() < EPS);
    }

    #[test]
    fn test_interior_particle_ignores_walls() {
        let params = params();
        let mut p = Particle::new(Vec2::new(0.5, 0.5), 0).with_velocity(Vec2::ONE);
        assert!(!resolve_walls(&mut p, &params));
        assert_eq!(p.vel(), Vec2::ONE);
    }

    #[test]
    fn test_resolve_against_lower_counts() {
        let params = params();
        let r = params.particle_radius;
        let mut particles = vec![
            Particle::new(Vec2::new(0.5, 0.5), 0),
            Particle::new(Vec2::new(0.9, 0.9), 0),
            Particle::new(Vec2::new(0.5 + r, 0.5), 0).with_velocity(Vec2::new(-1.0, 0.0)),
        ];
        let mut stats = CollisionStats::default();

        resolve_against_lower(&mut particles, 2, &params, &mut stats);

        assert_eq!(stats.contacts, 1);
        assert_eq!(stats.impulses, 1);
        assert_eq!(stats.degenerate, 0);
        assert_eq!(stats.wall_hits, 0);
        assert_eq!(particles[1].pos(), Vec2::new(0.9, 0.9));
    }

    #[test]
    fn test_clamp_to_bounds_keeps_velocity() {
        let params = params();
        let mut p = Particle::new(Vec2::new(0.5, -0.01), 0).with_velocity(Vec2::new(0.0, -1.0));
        assert!(clamp_to_bounds(&mut p, &params));
        assert_eq!(p.pos(), Vec2::new(0.5, params.min_coord()));
        assert_eq!(p.vel(), Vec2::new(0.0, -1.0));
        assert!(!clamp_to_bounds(&mut p, &params));
    }

    #[test]
    fn test_in_bounds() {
        let params = params();
        assert!(in_bounds(Vec2::splat(params.min_coord()), &params));
        assert!(!in_bounds(Vec2::new(0.0, 0.5), &params));
    }
}
