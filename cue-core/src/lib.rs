//! # Cue Core
//!
//! A shot physics engine for pool.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec2, Ball, Table, pockets)
//! - `collision`: Analytic contact prediction and restitution response
//! - `rails`: Cushion contacts
//! - `pockets`: Pocket capture test
//! - `forces`: Cloth friction
//! - `difficulty`: Heuristic shot difficulty score
//! - `simulation`: Fixed-timestep shot orchestrator
//! - `presets`: YAML-based table/ball/simulation configuration loader

pub mod collision;
pub mod difficulty;
pub mod forces;
pub mod pockets;
pub mod presets;
pub mod rails;
pub mod simulation;
pub mod types;
