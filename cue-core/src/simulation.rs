//! Fixed-timestep shot simulation.
//!
//! Each step runs, in order:
//!
//! ```text
//! 1. ball-ball: predict every unordered pair, resolve on contact
//! 2. rails:     clamp + bounce, or advance position by v·dt
//! 3. friction:  decelerate every ball
//! 4. pockets:   stop at the first object ball that drops
//! 5. record:    push the cue ball position
//! 6. rest:      stop once every ball is below the rest speed
//! ```
//!
//! Pairs are resolved one after another in index order (cue ball first),
//! so a ball touched by two others in the same step sees the first
//! resolution before the second is computed. Trajectories depend on this
//! ordering.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::collision::{find_overlaps, CollisionDetector, CollisionResolver};
use crate::difficulty::ShotDifficultyScorer;
use crate::forces::{FrictionModel, LinearFriction};
use crate::pockets::PocketDetector;
use crate::rails::RailHandler;
use crate::types::{constants, Ball, Pocket, Table, Vec2};

/// Trajectory points reserved up front; longer shots grow the buffer.
const TRAJECTORY_RESERVE: usize = 4096;

/// Step budget and integration constants for one shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Maximum number of steps before giving up
    pub max_steps: usize,
    /// Timestep in seconds
    pub dt: f64,
    /// Every ball slower than this (m/s) ends the shot
    pub rest_speed: f64,
    /// Gravitational acceleration used by cloth friction (m/s²)
    pub gravity: f64,
    /// Record every ball's path, not only the cue ball's
    pub record_all_paths: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            dt: 0.001,
            rest_speed: constants::REST_SPEED,
            gravity: constants::GRAVITY,
            record_all_paths: false,
        }
    }
}

/// Why the simulation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    PocketSuccess,
    AllAtRest,
    StepBudgetExhausted,
}

/// Result of simulating one shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotOutcome {
    /// An object ball was pocketed
    pub success: bool,
    /// Cue ball position before the shot, then after every step
    pub cue_trajectory: Vec<Vec2>,
    pub termination: Termination,
    /// Steps executed
    pub steps: usize,
    /// Index into the object balls, and the pocket it dropped into
    pub pocketed: Option<(usize, Pocket)>,
    /// Per-ball paths (cue ball first), when `record_all_paths` is set
    pub ball_paths: Option<Vec<Vec<Vec2>>>,
    /// Pre-shot difficulty of the first object ball into the target pocket
    pub difficulty: Option<f64>,
}

impl ShotOutcome {
    /// The minimal `(success, cue trajectory)` result.
    pub fn into_parts(self) -> (bool, Vec<Vec2>) {
        (self.success, self.cue_trajectory)
    }
}

/// Runs shots on one table.
///
/// The simulator holds no state between calls; concurrent shots only
/// need their own ball arrays.
pub struct ShotSimulator<'a, F: FrictionModel = LinearFriction> {
    table: &'a Table,
    config: SimulationConfig,
    friction: F,
    detector: CollisionDetector,
}

impl<'a> ShotSimulator<'a, LinearFriction> {
    pub fn new(table: &'a Table) -> Self {
        Self::with_config(table, SimulationConfig::default())
    }

    pub fn with_config(table: &'a Table, config: SimulationConfig) -> Self {
        let friction = LinearFriction::new(table.surface_friction, config.gravity);
        Self::with_friction(table, config, friction)
    }
}

impl<'a, F: FrictionModel> ShotSimulator<'a, F> {
    pub fn with_friction(table: &'a Table, config: SimulationConfig, friction: F) -> Self {
        Self {
            table,
            config,
            friction,
            detector: CollisionDetector::new(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulate a shot from cue strike until a pocket, global rest, or the step budget.
    ///
    /// `cue` and `objects` are left in their final state. `target` is the
    /// intended pocket; it feeds the difficulty estimate, while success
    /// counts any object ball dropping into any of the six pockets.
    pub fn simulate(&self, cue: &mut Ball, objects: &mut [Ball], target: Vec2) -> ShotOutcome {
        let dt = self.config.dt;
        let rails = RailHandler::new(self.table);
        let pockets = self.table.pocket_positions();

        let mut balls: Vec<Ball> = std::iter::once(*cue).chain(objects.iter().copied()).collect();
        for (i, j) in find_overlaps(&balls) {
            warn!(first = i, second = j, "balls overlap at shot start");
        }

        let difficulty = objects
            .first()
            .map(|object| ShotDifficultyScorer::new(self.table).score(cue, object, target));
        debug!(
            balls = balls.len(),
            cue_speed = cue.speed(),
            ?difficulty,
            "simulating shot"
        );

        let reserve = self.config.max_steps.saturating_add(1).min(TRAJECTORY_RESERVE);
        let mut cue_trajectory = Vec::with_capacity(reserve);
        cue_trajectory.push(balls[0].position);
        let mut ball_paths = self
            .config
            .record_all_paths
            .then(|| balls.iter().map(|b| vec![b.position]).collect::<Vec<_>>());

        let mut termination = Termination::StepBudgetExhausted;
        let mut pocketed = None;
        let mut steps = 0;

        while steps < self.config.max_steps {
            steps += 1;

            for i in 0..balls.len() {
                for j in (i + 1)..balls.len() {
                    if let Some(point) = self.detector.predict(&balls[i], &balls[j]).contact_point() {
                        let (v1, v2) = CollisionResolver::resolve(&balls[i], &balls[j]);
                        balls[i].velocity = v1;
                        balls[j].velocity = v2;
                        trace!(step = steps, first = i, second = j, ?point, "ball contact");
                    }
                }
            }

            for (i, ball) in balls.iter_mut().enumerate() {
                match rails.check_collision(ball, dt) {
                    Some(contact) => {
                        rails.apply(ball, &contact);
                        trace!(step = steps, ball = i, ?contact, "rail contact");
                    }
                    None => ball.position += ball.velocity * dt,
                }
            }

            for ball in balls.iter_mut() {
                ball.velocity = self.friction.decelerate(ball.velocity, dt);
            }

            pocketed = balls.iter().enumerate().skip(1).find_map(|(i, ball)| {
                if !PocketDetector::is_pocketed(ball, &pockets, self.table.pocket_radius) {
                    return None;
                }
                PocketDetector::pocket_for(ball, self.table).map(|pocket| (i - 1, pocket))
            });

            cue_trajectory.push(balls[0].position);
            if let Some(paths) = ball_paths.as_mut() {
                for (path, ball) in paths.iter_mut().zip(&balls) {
                    path.push(ball.position);
                }
            }

            if pocketed.is_some() {
                termination = Termination::PocketSuccess;
                break;
            }
            if balls.iter().all(|b| !b.is_moving(self.config.rest_speed)) {
                termination = Termination::AllAtRest;
                break;
            }
        }

        *cue = balls[0];
        objects.copy_from_slice(&balls[1..]);

        let success = termination == Termination::PocketSuccess;
        debug!(steps, ?termination, success, ?pocketed, "shot finished");

        ShotOutcome {
            success,
            cue_trajectory,
            termination,
            steps,
            pocketed,
            ball_paths,
            difficulty,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lone_cue_ball_rolls_to_rest() {
        let table = Table::default();
        let sim = ShotSimulator::new(&table);
        let mut cue = Ball::new(Vec2::new(0.5, 0.6), Vec2::new(0.5, 0.0));

        let outcome = sim.simulate(&mut cue, &mut [], Vec2::new(2.54, 1.27));

        // 0.5 m/s at 1.962 m/s² drops below 0.01 m/s after ~250 steps
        assert_eq!(outcome.termination, Termination::AllAtRest);
        assert!(!outcome.success);
        assert!(outcome.steps < 300, "took {} steps", outcome.steps);
        assert_eq!(outcome.cue_trajectory.len(), outcome.steps + 1);
        assert_eq!(outcome.difficulty, None);
        assert!(cue.position.x > 0.5, "Cue ball should have moved");
        assert_eq!(outcome.cue_trajectory.last(), Some(&cue.position));
    }

    #[test]
    fn test_zero_step_budget() {
        let table = Table::default();
        let config = SimulationConfig {
            max_steps: 0,
            ..SimulationConfig::default()
        };
        let sim = ShotSimulator::with_config(&table, config);
        let start = Vec2::new(0.5, 0.5);
        let mut cue = Ball::new(start, Vec2::new(2.0, 0.0));

        let outcome = sim.simulate(&mut cue, &mut [], Vec2::ZERO);

        assert_eq!(outcome.termination, Termination::StepBudgetExhausted);
        assert_eq!(outcome.cue_trajectory, vec![start]);
        assert_eq!(outcome.steps, 0);
    }

    #[test]
    fn test_huge_step_budget_still_ends_at_rest() {
        let table = Table::default();
        for max_steps in [usize::MAX, 1usize << 62, 10_000_000_000] {
            let config = SimulationConfig {
                max_steps,
                record_all_paths: true,
                ..SimulationConfig::default()
            };
            let sim = ShotSimulator::with_config(&table, config);
            let mut cue = Ball::new(Vec2::new(0.5, 0.6), Vec2::new(0.5, 0.0));

            let outcome = sim.simulate(&mut cue, &mut [], Vec2::ZERO);

            assert_eq!(outcome.termination, Termination::AllAtRest);
            assert!(outcome.steps < 300, "took {} steps", outcome.steps);
            assert_eq!(outcome.cue_trajectory.len(), outcome.steps + 1);
        }
    }

    #[test]
    fn test_cue_ball_bounces_off_rail() {
        let table = Table::default();
        let sim = ShotSimulator::new(&table);
        let mut cue = Ball::new(Vec2::new(0.2, 0.6), Vec2::new(-2.0, 0.0));

        let outcome = sim.simulate(&mut cue, &mut [], Vec2::ZERO);

        let min_x = outcome
            .cue_trajectory
            .iter()
            .map(|p| p.x)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(min_x, Ball::STANDARD_RADIUS, "Ball should rest against the cushion once");
        assert!(cue.velocity.x >= 0.0, "Ball should be heading away from the rail");
        assert!(cue.position.x > min_x);
    }

    #[test]
    fn test_records_all_paths_when_asked() {
        let table = Table::default();
        let config = SimulationConfig {
            record_all_paths: true,
            ..SimulationConfig::default()
        };
        let sim = ShotSimulator::with_config(&table, config);
        let mut cue = Ball::new(Vec2::new(0.5, 0.5), Vec2::new(2.0, 0.0));
        let mut objects = [Ball::at_rest(Vec2::new(1.0, 0.5))];

        let outcome = sim.simulate(&mut cue, &mut objects, Vec2::new(2.54, 0.5));

        let paths = outcome.ball_paths.as_ref().expect("Paths should be recorded");
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], outcome.cue_trajectory);
        assert_eq!(paths[1].len(), outcome.cue_trajectory.len());
        assert_eq!(paths[1].last(), Some(&objects[0].position));
    }

    #[test]
    fn test_custom_friction_model() {
        struct Frictionless;
        impl FrictionModel for Frictionless {
            fn decelerate(&self, velocity: Vec2, _dt: f64) -> Vec2 {
                velocity
            }
        }

        let table = Table::default();
        let config = SimulationConfig {
            max_steps: 100,
            ..SimulationConfig::default()
        };
        let sim = ShotSimulator::with_friction(&table, config, Frictionless);
        let mut cue = Ball::new(Vec2::new(0.5, 0.6), Vec2::new(1.0, 0.0));

        let outcome = sim.simulate(&mut cue, &mut [], Vec2::ZERO);

        assert_eq!(outcome.termination, Termination::StepBudgetExhausted);
        assert!((cue.position.x - 0.6).abs() < 1e-9);
        assert_eq!(cue.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_into_parts() {
        let outcome = ShotOutcome {
            success: true,
            cue_trajectory: vec![Vec2::ZERO, Vec2::new(0.1, 0.0)],
            termination: Termination::PocketSuccess,
            steps: 1,
            pocketed: Some((0, Pocket::TopRight)),
            ball_paths: None,
            difficulty: Some(0.2),
        };

        let (success, trajectory) = outcome.into_parts();
        assert!(success);
        assert_eq!(trajectory.len(), 2);
    }
}
