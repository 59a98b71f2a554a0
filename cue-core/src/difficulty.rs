//! Heuristic shot difficulty.
//!
//! Three factors, each normalized to `[0, 1]`:
//!
//! | Factor   | Measures                                  | Weight |
//! |----------|-------------------------------------------|--------|
//! | distance | cue ball to object ball, over table width | 0.3    |
//! | angle    | cut angle, over π                         | 0.5    |
//! | pocket   | object ball to pocket, over table width   | 0.2    |
//!
//! A straight-in shot has a cut angle of 0; a cut angle of π/2 or more
//! cannot be made with a plain center-ball hit.

use crate::types::{Ball, Table, Vec2};

pub const DISTANCE_WEIGHT: f64 = 0.3;
pub const ANGLE_WEIGHT: f64 = 0.5;
pub const POCKET_WEIGHT: f64 = 0.2;

/// Normalized inputs to the difficulty score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyFactors {
    pub distance: f64,
    pub angle: f64,
    pub pocket: f64,
}

impl DifficultyFactors {
    pub fn measure(table: &Table, cue: &Ball, object: &Ball, pocket: Vec2) -> Self {
        let to_object = object.position - cue.position;
        let to_pocket = pocket - object.position;

        Self {
            distance: (to_object.magnitude() / table.width).clamp(0.0, 1.0),
            angle: to_object.angle(&to_pocket) / std::f64::consts::PI,
            pocket: (to_pocket.magnitude() / table.width).clamp(0.0, 1.0),
        }
    }

    /// Weighted sum, clamped to `[0, 1]`.
    pub fn combine(&self) -> f64 {
        (DISTANCE_WEIGHT * self.distance + ANGLE_WEIGHT * self.angle + POCKET_WEIGHT * self.pocket)
            .clamp(0.0, 1.0)
    }
}

/// Scores how hard it is to sink an object ball in a given pocket.
pub struct ShotDifficultyScorer<'a> {
    table: &'a Table,
}

impl<'a> ShotDifficultyScorer<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Difficulty in `[0, 1]`; 0 is trivial.
    pub fn score(&self, cue: &Ball, object: &Ball, pocket: Vec2) -> f64 {
        DifficultyFactors::measure(self.table, cue, object, pocket).combine()
    }
}

// =============================================================================
// Tests
// =============================================================================
