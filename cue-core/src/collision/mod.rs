//! Ball-ball collision prediction and resolution.
//!
//! This module handles:
//! - **Detection**: analytic time-to-contact for a ball pair, and
//!   classification of the contact as direct or glancing
//! - **Resolution**: post-collision velocities along the line of centers
//!
//! ## Closed-form Contact Time
//!
//! Instead of checking whether two balls overlap after a step (which
//! misses fast balls), we solve for the moment their centers are exactly
//! `r1 + r2` apart while moving on straight lines.
//!
//! ```text
//!   b1 ●──────→        ←──────● b2
//!              ●●
//!              └─ contact: |Δp + t·Δv| = r1 + r2
//! ```

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
