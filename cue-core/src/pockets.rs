//! Pocket capture test.
//!
//! A ball is sunk when its center is within the pocket radius of a pocket
//! center *and* it is heading into that pocket (less than 60° off the
//! direction to the pocket center). This models a ball rolling into the
//! jaws; a ball lying inside the radius while at rest or moving away is
//! not captured.

use crate::types::{constants, Ball, Pocket, Table, Vec2};

pub struct PocketDetector;

impl PocketDetector {
    /// True if `ball` drops into any of `pockets`.
    pub fn is_pocketed(ball: &Ball, pockets: &[Vec2], pocket_radius: f64) -> bool {
        pockets
            .iter()
            .any(|pocket| Self::captures(ball, pocket, pocket_radius))
    }

    /// The table pocket that captures `ball`, if any.
    pub fn pocket_for(ball: &Ball, table: &Table) -> Option<Pocket> {
        Pocket::ALL
            .into_iter()
            .find(|&p| Self::captures(ball, &table.pocket_position(p), table.pocket_radius))
    }

    fn captures(ball: &Ball, pocket: &Vec2, pocket_radius: f64) -> bool {
        if ball.velocity == Vec2::ZERO {
            return false;
        }
        let to_pocket = *pocket - ball.position;
        if to_pocket.magnitude() > pocket_radius {
            return false;
        }
        ball.velocity.angle(&to_pocket.normalize()) < constants::POCKET_ENTRY_ANGLE
    }
}

// =============================================================================
// Tests
// =============================================================================
