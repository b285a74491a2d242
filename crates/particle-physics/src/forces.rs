//! Body forces, integration and pointer forcing

use crate::constants::SEPARATION_EPSILON;
use crate::params::WorldParams;
use crate::particle::Particle;
use glam::Vec2;

/// Acceleration felt at `position`: upward inside the elevator strip,
/// gravity everywhere else.
pub fn zone_acceleration(position: Vec2, params: &WorldParams) -> Vec2 {
    if position.x < params.elevator_fraction {
        Vec2::new(0.0, params.elevator_acceleration)
    } else {
        Vec2::new(0.0, params.gravity)
    }
}

/// Advance one particle by `dt` with semi-implicit Euler.
///
/// Velocity is updated first and the new velocity moves the particle.
/// Nothing is clamped here; walls are handled by the collision pass.
pub fn integrate(particle: &mut Particle, params: &WorldParams) {
    let acceleration = zone_acceleration(particle.pos(), params);
    let velocity = particle.vel() + acceleration * params.dt;
    let position = particle.pos() + velocity * params.dt;

    particle.set_acc(acceleration);
    particle.set_vel(velocity);
    particle.set_pos(position);
}

/// Whether `position` lies strictly inside the pointer's interaction radius
#[inline]
pub fn within_pointer(position: Vec2, pointer: Vec2, params: &WorldParams) -> bool {
    position.distance_squared(pointer) < params.pointer_radius() * params.pointer_radius()
}

/// Velocity kick the pointer gives a particle at `position`.
///
/// Points from the particle back toward the pointer, with magnitude
/// `|pointer_velocity| * pointer_force_scale`. Zero outside the interaction
/// radius and for particles sitting exactly on the pointer.
pub fn pointer_kick(
    position: Vec2,
    pointer: Vec2,
    pointer_velocity: Vec2,
    params: &WorldParams,
) -> Vec2 {
    let offset = position - pointer;
    let distance = offset.length();

    if distance >= params.pointer_radius() || distance < SEPARATION_EPSILON {
        return Vec2::ZERO;
    }

    -(offset / distance) * pointer_velocity.length() * params.pointer_force_scale
}

/// Apply the pointer kick to every particle. Returns how many were touched.
pub fn apply_pointer_force(
    particles: &mut [Particle],
    pointer: Vec2,
    pointer_velocity: Vec2,
    params: &WorldParams,
) -> usize {
    let mut touched = 0;
    for p in particles.iter_mut() {
        let kick = pointer_kick(p.pos(), pointer, pointer_velocity, params);
        if kick != Vec2::ZERO {
            p.set_vel(p.vel() + kick);
            touched += 1;
        }
    }
    touched
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-6;

    #[test]
    fn test_elevator_zone_pushes_up() {
        let params = WorldParams::default();
        let a = zone_acceleration(Vec2::new(0.1, 0.5), &params);
        assert_eq!(a, Vec2::new(0.0, params.elevator_acceleration));
    }

    #[test]
    fn test_gravity_outside_elevator() {
        let params = WorldParams::default();
        let a = zone_acceleration(Vec2::new(0.5, 0.5), &params);
        assert_eq!(a, Vec2::new(0.0, params.gravity));

        // The strip boundary itself belongs to the gravity side
        let edge = zone_acceleration(Vec2::new(params.elevator_fraction, 0.5), &params);
        assert_eq!(edge, Vec2::new(0.0, params.gravity));
    }

    #[test]
    fn test_integrate_semi_implicit() {
        let params = WorldParams::default();
        let mut p = Particle::new(Vec2::new(0.5, 0.5), 0).with_velocity(Vec2::new(1.0, 0.0));
        integrate(&mut p, &params);

        let v_y = params.gravity * params.dt;
        assert_eq!(p.acc(), Vec2::new(0.0, params.gravity));
        assert!((p.vel() - Vec2::new(1.0, v_y)).length() < EPS);
        // Position moves with the updated velocity
        let expected = Vec2::new(0.5 + params.dt, 0.5 + v_y * params.dt);
        assert!((p.pos() - expected).length() < EPS);
    }

    #[test]
    fn test_integrate_does_not_clamp() {
        let params = WorldParams::default();
        let mut p = Particle::new(Vec2::new(1.5, 1.5), 0);
        integrate(&mut p, &params);
        assert!(p.position[0] > 1.0 && p.position[1] > 1.0);
    }

    #[test]
    fn test_pointer_kick_outside_radius_is_zero() {
        let params = WorldParams::default();
        let pointer = Vec2::new(0.5, 0.5);
        let at_edge = pointer + Vec2::new(params.pointer_radius(), 0.0);
        let kick = pointer_kick(at_edge, pointer, Vec2::new(0.1, 0.0), &params);
        assert_eq!(kick, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_kick_points_back_at_pointer() {
        let params = WorldParams::default();
        let pointer = Vec2::new(0.5, 0.5);
        let offset = Vec2::new(0.3, 0.4) * params.pointer_radius() * 0.5;
        let pointer_velocity = Vec2::new(0.0, 0.02);

        let kick = pointer_kick(pointer + offset, pointer, pointer_velocity, &params);

        let expected_len = pointer_velocity.length() * params.pointer_force_scale;
        assert!((kick.length() - expected_len).abs() < 1.0e-5);
        // Exactly opposite the displacement
        assert!((kick.normalize() + offset.normalize()).length() < 1.0e-5);
    }

    #[test]
    fn test_pointer_kick_coincident_is_skipped() {
        let params = WorldParams::default();
        let pointer = Vec2::new(0.5, 0.5);
        let kick = pointer_kick(pointer, pointer, Vec2::new(1.0, 1.0), &params);
        assert_eq!(kick, Vec2::ZERO);
    }

    #[test]
    fn test_still_pointer_does_nothing() {
        let params = WorldParams::default();
        let pointer = Vec2::new(0.5, 0.5);
        let mut particles = vec![Particle::new(pointer + Vec2::new(0.01, 0.0), 0)];
        apply_pointer_force(&mut particles, pointer, Vec2::ZERO, &params);
        assert_eq!(particles[0].vel(), Vec2::ZERO);
    }

    #[test]
    fn test_apply_pointer_force_only_touches_nearby() {
        let params = WorldParams::default();
        let pointer = Vec2::new(0.5, 0.5);
        let mut particles = vec![
            Particle::new(pointer + Vec2::new(0.01, 0.0), 0),
            Particle::new(Vec2::new(0.9, 0.9), 0),
        ];

        let touched = apply_pointer_force(&mut particles, pointer, Vec2::new(0.01, 0.0), &params);

        assert_eq!(touched, 1);
        assert!(particles[0].vel().x < 0.0);
        assert_eq!(particles[1].vel(), Vec2::ZERO);
        assert_eq!(particles[0].pos(), pointer + Vec2::new(0.01, 0.0));
    }

    #[test]
    fn test_within_pointer() {
        let params = WorldParams::default();
        let pointer = Vec2::new(0.5, 0.5);
        assert!(within_pointer(pointer, pointer, &params));
        assert!(!within_pointer(
            pointer + Vec2::new(params.pointer_radius(), 0.0),
            pointer,
            &params
        ));
    }
}
