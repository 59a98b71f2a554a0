//! Cloth friction acting on rolling balls.
//!
//! The default model is a constant deceleration `μ·g` opposing motion:
//!
//! ```text
//! speed' = max(0, speed − μ·g·dt)
//! ```
//!
//! Direction is preserved, and a ball never reverses under friction; it
//! just stops.

use crate::types::{constants, Table, Vec2};

/// Trait for slowing a ball down over one timestep.
///
/// Implementations provide the cloth model; the simulator calls it once
/// per ball per step after positions are advanced.
pub trait FrictionModel {
    /// Velocity after `dt` seconds of rolling.
    fn decelerate(&self, velocity: Vec2, dt: f64) -> Vec2;
}

/// Constant-deceleration rolling friction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFriction {
    /// Cloth friction coefficient μ
    pub coefficient: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
}

impl LinearFriction {
    pub fn new(coefficient: f64, gravity: f64) -> Self {
        Self {
            coefficient,
            gravity,
        }
    }

    /// Friction for a table's cloth under standard gravity.
    pub fn for_table(table: &Table) -> Self {
        Self::new(table.surface_friction, constants::GRAVITY)
    }

    /// Deceleration magnitude μ·g (m/s²)
    pub fn deceleration(&self) -> f64 {
        self.coefficient * self.gravity
    }
}

impl FrictionModel for LinearFriction {
    fn decelerate(&self, velocity: Vec2, dt: f64) -> Vec2 {
        let speed = velocity.magnitude();
        let new_speed = (speed - self.deceleration() * dt).max(0.0);
        velocity.normalize() * new_speed
    }
}

// =============================================================================
// Tests
// =============================================================================
