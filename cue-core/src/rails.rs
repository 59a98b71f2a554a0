//! Cushion (rail) contacts.
//!
//! The playing surface spans `[0, width] × [0, height]`. A ball touches a
//! rail when its edge would cross a boundary during the next step. The
//! crossed coordinate is clamped so the ball sits exactly against the
//! cushion, and the velocity component on that axis is reflected with
//! the table's rail restitution.
//!
//! Naming follows the cushion, not the motion: a *vertical* rail is the
//! left or right cushion (it reflects `x`), a *horizontal* rail is the top
//! or bottom cushion (it reflects `y`).

use crate::types::{Ball, Table, Vec2};

/// A rail contact found by [`RailHandler::check_collision`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailContact {
    /// Projected position with each crossed coordinate clamped.
    pub position: Vec2,
    /// Left or right cushion hit.
    pub hit_vertical: bool,
    /// Top or bottom cushion hit.
    pub hit_horizontal: bool,
}

/// Boundary-crossing detection and bounce response for one table.
pub struct RailHandler<'a> {
    table: &'a Table,
}

impl<'a> RailHandler<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Check whether the ball reaches a cushion within `dt`.
    ///
    /// Both axes are checked independently, so a ball driven into a corner
    /// reports both hits in the same step.
    pub fn check_collision(&self, ball: &Ball, dt: f64) -> Option<RailContact> {
        let r = ball.radius;
        let mut position = ball.position + ball.velocity * dt;
        let mut hit_vertical = false;
        let mut hit_horizontal = false;

        if position.x - r < 0.0 {
            position.x = r;
            hit_vertical = true;
        } else if position.x + r > self.table.width {
            position.x = self.table.width - r;
            hit_vertical = true;
        }

        if position.y - r < 0.0 {
            position.y = r;
            hit_horizontal = true;
        } else if position.y + r > self.table.height {
            position.y = self.table.height - r;
            hit_horizontal = true;
        }

        (hit_vertical || hit_horizontal).then_some(RailContact {
            position,
            hit_vertical,
            hit_horizontal,
        })
    }

    /// Velocity after bouncing off one cushion.
    ///
    /// The component on the hit axis is negated and scaled by the rail
    /// restitution; the other component is unchanged.
    pub fn bounce(&self, ball: &Ball, hit_vertical: bool) -> Vec2 {
        let e = self.table.rail_restitution;
        let v = ball.velocity;
        if hit_vertical {
            Vec2::new(-v.x * e, v.y)
        } else {
            Vec2::new(v.x, -v.y * e)
        }
    }

    /// Apply a contact to the ball: snap to the cushion and reflect every hit axis.
    pub fn apply(&self, ball: &mut Ball, contact: &RailContact) {
        ball.position = contact.position;
        if contact.hit_vertical {
            ball.velocity = self.bounce(ball, true);
        }
        if contact.hit_horizontal {
            ball.velocity = self.bounce(ball, false);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
