//! # Mirror Runtime
//!
//! Drives a pair of [`MirrorAgent`](mirror_core::agent::MirrorAgent)s
//! through simulated time and records what happens.
//!
//! Each step of a [`MirrorSystem`](system::MirrorSystem):
//! 1. Both agents mirror each other's pre-step state
//! 2. Mirror quality is scored against the partner's true vector
//! 3. Trust updates against the pre-step shared space
//! 4. Understanding updates
//! 5. States converge toward each other
//! 6. Energy decays
//! 7. Metrics are appended to the [`Trajectory`](trajectory::Trajectory)
//! 8. Time advances and both agents decide whether to continue
//!
//! The [`experiment`] module runs batches of seeded trajectories for
//! regime comparisons and parameter sweeps.

pub mod error;
pub mod config;
pub mod trajectory;
pub mod system;
pub mod regime;
pub mod experiment;
pub mod prelude;
