//! Ball-ball collision resolution.
//!
//! Computes post-collision velocities for a pair of balls:
//! - Normal component (along the line of centers): 1-D collision with restitution
//! - Tangential component: passes through unchanged
//!
//! ## Model Assumptions
//!
//! - **Frictionless contact**: no throw, no spin transfer between balls.
//! - **Instantaneous collision**: the impulse is applied in one step,
//!   using the restitution of the first ball of the pair.
//!
//! ```text
//!        normal
//!     ●────────→●
//!    b1    ↑    b2
//!       tangent
//! ```

use crate::types::{Ball, Vec2};

/// Elastic collision resolver for ball pairs.
pub struct CollisionResolver;

impl CollisionResolver {
    /// Resolve a collision and return the new velocities `(v1', v2')`.
    ///
    /// With restitution `e = ball1.restitution`:
    ///
    /// ```text
    /// v1n' = (m1·v1n + m2·v2n − m2·e·(v1n − v2n)) / (m1 + m2)
    /// v2n' = (m1·v1n + m2·v2n + m1·e·(v1n − v2n)) / (m1 + m2)
    /// ```
    ///
    /// Momentum along the normal is conserved for any `e`; normal-axis
    /// kinetic energy is conserved for `e = 1`. Coincident centers give a
    /// zero normal, which leaves both velocities' normal parts at zero
    /// rather than producing NaN.
    pub fn resolve(ball1: &Ball, ball2: &Ball) -> (Vec2, Vec2) {
        let normal = (ball2.position - ball1.position).normalize();
        let tangent = normal.perpendicular();

        let v1n = ball1.velocity.dot(&normal);
        let v1t = ball1.velocity.dot(&tangent);
        let v2n = ball2.velocity.dot(&normal);
        let v2t = ball2.velocity.dot(&tangent);

        let (m1, m2) = (ball1.mass, ball2.mass);
        let e = ball1.restitution;
        let momentum = m1 * v1n + m2 * v2n;
        let closing = v1n - v2n;
        let total_mass = m1 + m2;

        let v1n_new = (momentum - m2 * e * closing) / total_mass;
        let v2n_new = (momentum + m1 * e * closing) / total_mass;

        (
            normal * v1n_new + tangent * v1t,
            normal * v2n_new + tangent * v2t,
        )
    }

    /// Kinetic energy of velocities `v1`, `v2` projected on the line of centers.
    pub fn normal_energy(ball1: &Ball, ball2: &Ball, v1: Vec2, v2: Vec2) -> f64 {
        let normal = (ball2.position - ball1.position).normalize();
        let v1n = v1.dot(&normal);
        let v2n = v2.dot(&normal);
        0.5 * ball1.mass * v1n * v1n + 0.5 * ball2.mass * v2n * v2n
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball_with(position: Vec2, velocity: Vec2, mass: f64, restitution: f64) -> Ball {
        Ball {
            mass,
            restitution,
            ..Ball::new(position, velocity)
        }
    }

    fn normal_momentum(b1: &Ball, b2: &Ball, v1: Vec2, v2: Vec2) -> f64 {
        let normal = (b2.position - b1.position).normalize();
        b1.mass * v1.dot(&normal) + b2.mass * v2.dot(&normal)
    }

    #[test]
    fn test_equal_mass_head_on_swaps_velocities() {
        let cue = ball_with(Vec2::new(0.5, 0.5), Vec2::new(2.0, 0.0), 0.17, 1.0);
        let object = ball_with(Vec2::new(0.56, 0.5), Vec2::ZERO, 0.17, 1.0);

        let (v1, v2) = CollisionResolver::resolve(&cue, &object);

        assert!(v1.magnitude() < 1e-12, "Cue should stop, got {:?}", v1);
        assert!((v2.x - 2.0).abs() < 1e-12, "Object should take full speed");
        assert!(v2.y.abs() < 1e-12);
    }

    #[test]
    fn test_restitution_leaves_cue_rolling() {
        let cue = Ball::new(Vec2::new(0.5, 0.5), Vec2::new(2.0, 0.0));
        let object = Ball::at_rest(Vec2::new(0.56, 0.5));

        let (v1, v2) = CollisionResolver::resolve(&cue, &object);

        // e = 0.95: v1n' = (2 - 0.95*2)/2, v2n' = (2 + 0.95*2)/2
        assert!((v1.x - 0.05).abs() < 1e-12, "got v1 = {:?}", v1);
        assert!((v2.x - 1.95).abs() < 1e-12, "got v2 = {:?}", v2);
    }

    #[test]
    fn test_cut_shot_splits_at_right_angle() {
        // Object sits 45° off the cue's path; equal masses, e = 1
        let offset = Vec2::new(1.0, 1.0).normalize() * (2.0 * Ball::STANDARD_RADIUS);
        let cue = ball_with(Vec2::new(0.5, 0.5), Vec2::new(2.0, 0.0), 0.17, 1.0);
        let object = ball_with(Vec2::new(0.5, 0.5) + offset, Vec2::ZERO, 0.17, 1.0);

        let (v1, v2) = CollisionResolver::resolve(&cue, &object);

        // Tangent/normal split: the two balls leave 90° apart
        assert!(v1.dot(&v2).abs() < 1e-12, "v1={:?} v2={:?}", v1, v2);
        let cross = v2.x * offset.y - v2.y * offset.x;
        assert!(cross.abs() < 1e-12, "Object should leave along line of centers");
        assert!(v2.dot(&offset) > 0.0);
    }

    #[test]
    fn test_tangential_component_unchanged() {
        let cue = Ball::new(Vec2::new(0.5, 0.5), Vec2::new(1.0, 0.7));
        let object = Ball::new(Vec2::new(0.56, 0.5), Vec2::new(-0.3, -0.4));

        let (v1, v2) = CollisionResolver::resolve(&cue, &object);

        // Line of centers is the x axis, so y is tangential
        assert!((v1.y - 0.7).abs() < 1e-12);
        assert!((v2.y + 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_coincident_centers_do_not_produce_nan() {
        let a = Ball::new(Vec2::new(0.5, 0.5), Vec2::new(1.0, 0.0));
        let b = Ball::at_rest(Vec2::new(0.5, 0.5));

        let (v1, v2) = CollisionResolver::resolve(&a, &b);
        assert!(!v1.x.is_nan() && !v1.y.is_nan());
        assert!(!v2.x.is_nan() && !v2.y.is_nan());
    }

    proptest! {
        #[test]
        fn prop_elastic_conserves_normal_energy_and_momentum(
            x2 in 0.06f64..0.5, y2 in -0.5f64..0.5,
            vx1 in -5.0f64..5.0, vy1 in -5.0f64..5.0,
            vx2 in -5.0f64..5.0, vy2 in -5.0f64..5.0,
            m1 in 0.05f64..1.0, m2 in 0.05f64..1.0,
        ) {
            let b1 = ball_with(Vec2::ZERO, Vec2::new(vx1, vy1), m1, 1.0);
            let b2 = ball_with(Vec2::new(x2, y2), Vec2::new(vx2, vy2), m2, 1.0);

            let (v1, v2) = CollisionResolver::resolve(&b1, &b2);

            let energy_before = CollisionResolver::normal_energy(&b1, &b2, b1.velocity, b2.velocity);
            let energy_after = CollisionResolver::normal_energy(&b1, &b2, v1, v2);
            prop_assert!((energy_before - energy_after).abs() <= 1e-9 * energy_before.max(1.0));

            let p_before = normal_momentum(&b1, &b2, b1.velocity, b2.velocity);
            let p_after = normal_momentum(&b1, &b2, v1, v2);
            prop_assert!((p_before - p_after).abs() <= 1e-9 * p_before.abs().max(1.0));
        }

        #[test]
        fn prop_inelastic_never_gains_normal_energy(
            x2 in 0.06f64..0.5, y2 in -0.5f64..0.5,
            vx1 in -5.0f64..5.0, vy1 in -5.0f64..5.0,
            vx2 in -5.0f64..5.0, vy2 in -5.0f64..5.0,
            m1 in 0.05f64..1.0, m2 in 0.05f64..1.0,
            e in 0.0f64..0.999,
        ) {
            let b1 = ball_with(Vec2::ZERO, Vec2::new(vx1, vy1), m1, e);
            let b2 = ball_with(Vec2::new(x2, y2), Vec2::new(vx2, vy2), m2, e);

            let (v1, v2) = CollisionResolver::resolve(&b1, &b2);

            let energy_before = CollisionResolver::normal_energy(&b1, &b2, b1.velocity, b2.velocity);
            let energy_after = CollisionResolver::normal_energy(&b1, &b2, v1, v2);
            prop_assert!(energy_after <= energy_before + 1e-12 * energy_before.max(1.0));
        }
    }

    #[test]
    fn test_inelastic_strictly_loses_energy_when_closing() {
        let cue = Ball::new(Vec2::new(0.5, 0.5), Vec2::new(2.0, 0.3));
        let object = Ball::at_rest(Vec2::new(0.56, 0.52));

        let (v1, v2) = CollisionResolver::resolve(&cue, &object);

        let before = CollisionResolver::normal_energy(&cue, &object, cue.velocity, object.velocity);
        let after = CollisionResolver::normal_energy(&cue, &object, v1, v2);
        assert!(after < before, "before={} after={}", before, after);
    }
}
