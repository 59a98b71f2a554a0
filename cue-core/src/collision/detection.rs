//! Analytic ball-ball contact prediction.
//!
//! Both balls are assumed to keep their current velocities. The contact
//! time is the smallest non-negative root of
//!
//! ```text
//! |relPos + t·relVel|² = (r1 + r2)²
//! ```
//!
//! which is a quadratic in `t`. A negative discriminant means the paths
//! never come within touching distance.

use crate::types::{constants, Ball, CollisionOutcome};

/// Configuration for contact classification.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Approach angle (radians) below which a contact is Direct.
    pub direct_angle: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            direct_angle: constants::DIRECT_HIT_ANGLE,
        }
    }
}

/// Predicts ball-ball contacts.
#[derive(Debug, Clone, Default)]
pub struct CollisionDetector {
    pub config: DetectionConfig,
}

impl CollisionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Time until the two balls touch, if they are closing and their paths meet.
    ///
    /// Returns `None` when the balls are separating or at relative rest,
    /// when the paths miss, or when the earliest root lies in the past
    /// (which includes balls that already overlap).
    pub fn time_to_contact(ball1: &Ball, ball2: &Ball) -> Option<f64> {
        let rel_pos = ball2.position - ball1.position;
        let rel_vel = ball2.velocity - ball1.velocity;

        // Closing implies rel_vel != 0, so `a` below is never zero.
        if rel_pos.dot(&rel_vel) >= 0.0 {
            return None;
        }

        let contact_dist = ball1.radius + ball2.radius;
        let a = rel_vel.dot(&rel_vel);
        let b = 2.0 * rel_pos.dot(&rel_vel);
        let c = rel_pos.dot(&rel_pos) - contact_dist * contact_dist;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        if t < 0.0 {
            return None;
        }
        Some(t)
    }

    /// Predict whether and where `ball1` meets `ball2`.
    ///
    /// The contact point is where `ball1`'s center will be at the moment
    /// of contact.
    pub fn predict(&self, ball1: &Ball, ball2: &Ball) -> CollisionOutcome {
        let Some(t) = Self::time_to_contact(ball1, ball2) else {
            return CollisionOutcome::None;
        };

        let point = ball1.position + ball1.velocity * t;

        // Angle between the line of centers and the direction ball2 approaches from.
        let rel_pos = ball2.position - ball1.position;
        let approach = -(ball2.velocity - ball1.velocity);
        if rel_pos.angle(&approach) < self.config.direct_angle {
            CollisionOutcome::Direct(point)
        } else {
            CollisionOutcome::Glancing(point)
        }
    }
}

/// Index pairs `(i, j)`, `i < j`, of balls that already interpenetrate.
pub fn find_overlaps(balls: &[Ball]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            if balls[i].overlaps(&balls[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

// =============================================================================
// Tests
// =============================================================================
