//! # Mirror Core
//!
//! Core types for the reciprocal mirroring model.
//!
//! Two agents each hold a unit-norm state vector and a handful of scalars.
//! Every step an agent produces a noisy, quality-scaled *mirror* of its
//! partner's vector, scores how faithful that mirror was, and folds the
//! score into a monotone understanding of the partner. Optional trust
//! dynamics modulate mirror fidelity, convergence speed and the decision
//! to keep interacting.
//!
//! - [`state::State`]: normalized vector plus complexity, openness, energy
//! - [`agent::MirrorAgent`]: mirroring, understanding, convergence, choice
//! - [`trust::Trust`]: drift or memory-weighted trust, selected by [`trust::TrustModel`]
//!
//! ## Quick Start
//!
//! ```rust
//! use mirror_core::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(4577);
//! let state = State::random(100, 0.5, 0.7, 1.0, &mut rng).unwrap();
//! let agent = MirrorAgent::new("Agent_A", state);
//! assert_eq!(agent.phase(), Phase::Initial);
//! ```

pub mod types;
pub mod error;
pub mod vector;
pub mod state;
pub mod trust;
pub mod config;
pub mod agent;
pub mod prelude;
