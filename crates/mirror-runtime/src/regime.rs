//! Update regimes.
//!
//! In the simultaneous regime both agents observe each other every step
//! (the full [`MirrorSystem::step`]). In the sequential regime the agents
//! take turns: A observes B on even turns, B observes A on odd turns, and
//! a turn only mirrors, scores and updates the observer's understanding.

use crate::config::PairScenario;
use crate::error::Result;
use crate::system::MirrorSystem;
use mirror_core::vector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateRegime {
    Simultaneous,
    Sequential,
}

impl UpdateRegime {
    pub fn label(self) -> &'static str {
        match self {
            UpdateRegime::Simultaneous => "simultaneous",
            UpdateRegime::Sequential => "sequential",
        }
    }
}

impl<'a> MirrorSystem<'a> {
    /// One sequential turn. Returns the pair's mean understanding afterwards.
    ///
    /// Does not advance time or record to the trajectory.
    pub fn observe_turn(&mut self, turn: u64) -> f64 {
        let (observer, observed) = if turn % 2 == 0 {
            (&mut *self.a, &*self.b)
        } else {
            (&mut *self.b, &*self.a)
        };
        let mirror = observer.mirror(observed.state(), observer.understanding(), &mut self.rng);
        let quality = vector::correlation_or_zero(&mirror, observed.state().vector()).abs();
        observer.update_understanding(quality, observed.state().complexity());
        self.mean_understanding()
    }

    pub fn mean_understanding(&self) -> f64 {
        (self.a.understanding() + self.b.understanding()) / 2.0
    }

    /// Advance one step or turn under `regime`, returning mean understanding.
    pub fn advance(&mut self, regime: UpdateRegime, turn: u64) -> Result<f64> {
        match regime {
            UpdateRegime::Simultaneous => {
                self.step()?;
                Ok(self.mean_understanding())
            }
            UpdateRegime::Sequential => Ok(self.observe_turn(turn)),
        }
    }
}

/// Mean-understanding series of one seeded run of `steps` under `regime`.
///
/// Runs the full step budget regardless of disengagement.
pub fn run_regime(
    scenario: &PairScenario,
    regime: UpdateRegime,
    seed: u64,
    steps: u64,
) -> Result<Vec<f64>> {
    let (mut a, mut b, rng) = scenario.build(seed)?;
    let mut system = MirrorSystem::new(&mut a, &mut b, scenario.system.clone(), rng)?;
    (0..steps).map(|turn| system.advance(regime, turn)).collect()
}
