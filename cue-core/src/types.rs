//! Core types for the shot simulation.
//!
//! All units are SI:
//! - Position: meters (m), origin at the top-left pocket
//! - Velocity: meters per second (m/s)
//! - Mass: kilograms (kg)

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use thiserror::Error;

// =============================================================================
// Vec2 - 2D Vector
// =============================================================================

/// A 2D vector used for positions and velocities on the table cloth.
///
/// Coordinate system:
/// - X: along the table length, 0 at the left rail
/// - Y: along the table width, 0 at the top rail
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

#[allow(clippy::should_implement_trait)]
impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a unit vector in the same direction, or zero if magnitude is zero
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            Self::ZERO
        } else {
            self.scale(1.0 / mag)
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unsigned angle to `other` in radians, in `[0, π]`.
    ///
    /// Returns 0 when either vector has zero length. The cosine is clamped
    /// to `[-1, 1]` so rounding never pushes `acos` out of its domain.
    pub fn angle(&self, other: &Self) -> f64 {
        let mags = self.magnitude() * other.magnitude();
        if mags == 0.0 {
            return 0.0;
        }
        (self.dot(other) / mags).clamp(-1.0, 1.0).acos()
    }

    /// Counter-clockwise perpendicular: (x, y) -> (-y, x)
    pub fn perpendicular(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).magnitude()
    }
}

// Operator overloads for Vec2
impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Validation
// =============================================================================

/// A physical parameter outside its allowed range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be within [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },
}

fn positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}

fn unit_range(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfUnitRange { field, value })
    }
}

// =============================================================================
// Ball
// =============================================================================

/// Physical state of one ball.
///
/// The simulator mutates `position` and `velocity` in place every step.
/// Clone the ball first if the pre-shot state has to survive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f64,
    pub radius: f64,
    pub friction: f64,
    pub restitution: f64,
}

impl Ball {
    /// Standard pool ball mass, 170 g
    pub const STANDARD_MASS: f64 = 0.17;
    /// Standard pool ball radius (2.25 in diameter)
    pub const STANDARD_RADIUS: f64 = 0.028575;
    pub const STANDARD_FRICTION: f64 = 0.2;
    pub const STANDARD_RESTITUTION: f64 = 0.95;

    /// A standard pool ball with the given position and velocity.
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            mass: Self::STANDARD_MASS,
            radius: Self::STANDARD_RADIUS,
            friction: Self::STANDARD_FRICTION,
            restitution: Self::STANDARD_RESTITUTION,
        }
    }

    /// Standard ball at rest at a given position
    pub fn at_rest(position: Vec2) -> Self {
        Self::new(position, Vec2::ZERO)
    }

    /// Strike the ball toward `target` at `speed` m/s.
    ///
    /// A target on top of the ball leaves it at rest.
    pub fn struck_toward(mut self, target: Vec2, speed: f64) -> Self {
        self.velocity = (target - self.position).normalize() * speed;
        self
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn is_moving(&self, threshold: f64) -> bool {
        self.speed() >= threshold
    }

    /// Translational kinetic energy (J)
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    /// True when the two balls interpenetrate.
    pub fn overlaps(&self, other: &Ball) -> bool {
        self.position.distance(&other.position) < self.radius + other.radius
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("mass", self.mass)?;
        positive("radius", self.radius)?;
        unit_range("friction", self.friction)?;
        unit_range("restitution", self.restitution)
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::at_rest(Vec2::ZERO)
    }
}

// =============================================================================
// Table
// =============================================================================

/// The six capture zones, named as seen from above with the head rail on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pocket {
    TopLeft,
    TopSide,
    TopRight,
    BottomLeft,
    BottomSide,
    BottomRight,
}

impl Pocket {
    pub const ALL: [Pocket; 6] = [
        Pocket::TopLeft,
        Pocket::TopSide,
        Pocket::TopRight,
        Pocket::BottomLeft,
        Pocket::BottomSide,
        Pocket::BottomRight,
    ];
}

/// Static table geometry and cloth/rail constants.
///
/// Pocket positions are always derived from `width` and `height`, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub width: f64,
    pub height: f64,
    pub pocket_radius: f64,
    pub rail_restitution: f64,
    pub surface_friction: f64,
}

impl Table {
    /// 8-ft table, 2.54m x 1.27m playing surface
    pub fn eight_foot() -> Self {
        Self::with_dimensions(2.54, 1.27)
    }

    /// 9-ft tournament table, 2.84m x 1.42m
    pub fn nine_foot() -> Self {
        Self::with_dimensions(2.84, 1.42)
    }

    /// 7-ft bar table, 2.13m x 1.07m
    pub fn seven_foot() -> Self {
        Self::with_dimensions(2.13, 1.07)
    }

    fn with_dimensions(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pocket_radius: 0.057,
            rail_restitution: 0.7,
            surface_friction: 0.2,
        }
    }

    pub fn pocket_position(&self, pocket: Pocket) -> Vec2 {
        match pocket {
            Pocket::TopLeft => Vec2::new(0.0, 0.0),
            Pocket::TopSide => Vec2::new(self.width / 2.0, 0.0),
            Pocket::TopRight => Vec2::new(self.width, 0.0),
            Pocket::BottomLeft => Vec2::new(0.0, self.height),
            Pocket::BottomSide => Vec2::new(self.width / 2.0, self.height),
            Pocket::BottomRight => Vec2::new(self.width, self.height),
        }
    }

    /// Pocket centers in `Pocket::ALL` order.
    pub fn pocket_positions(&self) -> [Vec2; 6] {
        Pocket::ALL.map(|p| self.pocket_position(p))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("pocket_radius", self.pocket_radius)?;
        unit_range("rail_restitution", self.rail_restitution)?;
        unit_range("surface_friction", self.surface_friction)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::eight_foot()
    }
}

// =============================================================================
// Collision Types
// =============================================================================

/// Predicted contact between two balls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    None,
    /// Near head-on approach; carries the contact point
    Direct(Vec2),
    /// Off-center approach; carries the contact point
    Glancing(Vec2),
}

impl CollisionOutcome {
    pub fn contact_point(&self) -> Option<Vec2> {
        match *self {
            CollisionOutcome::None => None,
            CollisionOutcome::Direct(p) | CollisionOutcome::Glancing(p) => Some(p),
        }
    }
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Physical constants used in the simulation.
pub mod constants {
    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f64 = 9.81;

    /// Speed below which a ball counts as at rest (m/s)
    pub const REST_SPEED: f64 = 0.01;

    /// Approach angle below which a contact is Direct (30°)
    pub const DIRECT_HIT_ANGLE: f64 = std::f64::consts::PI / 6.0;

    /// Maximum angle between heading and pocket direction for a sink (60°)
    pub const POCKET_ENTRY_ANGLE: f64 = std::f64::consts::PI / 3.0;
}

// =============================================================================
// Tests
// =============================================================================
