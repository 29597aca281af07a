//! # Mirror
//!
//! Agent-based simulation of reciprocal mirroring.
//!
//! Two agents repeatedly build noisy copies ("mirrors") of each other's
//! internal state. The faithfulness of each mirror feeds a monotone
//! understanding of the partner, which in turn speeds up convergence of
//! the two states. Optional trust dynamics make the relationship
//! path-dependent.
//!
//! ## Quick Start
//!
//! ```rust
//! use mirror::prelude::*;
//!
//! // The reference pairing, seeded
//! let scenario = PairScenario::reference();
//! let (mut a, mut b, rng) = scenario.build(4577).unwrap();
//!
//! // Couple the agents and run until one disengages
//! let mut system = MirrorSystem::new(&mut a, &mut b, scenario.system.clone(), rng).unwrap();
//! let outcome = system.simulate(100).unwrap();
//! assert_eq!(outcome.steps, 100);
//!
//! // Every metric series has one entry per step
//! let trajectory = system.trajectory();
//! assert_eq!(trajectory.get(Metric::SharedSpace).len(), 100);
//! ```
//!
//! ## Architecture
//!
//! - [`mirror_core`] - States, trust models, the mirroring agent
//! - [`mirror_analysis`] - Information proxies, changepoints, fits, t-tests
//! - [`mirror_runtime`] - Step orchestration, trajectories, regimes, experiments
//!
//! ## Trust Models
//!
//! | Model | Bounds | Dynamics |
//! |-------|--------|----------|
//! | `Disabled` | n/a | No trust; all modulation factors are 1 |
//! | `Drift` | 0.2 to 0.9 | Memoryless relaxation toward 0.5 |
//! | `MemoryWeighted` | 0.1 to 1.0 | Slow rebuild on success, fast loss on betrayal |
//!
//! ```rust
//! use mirror::prelude::*;
//!
//! let scenario = PairScenario::reference().with_trusts(TrustModel::memory_weighted(), 0.7, 0.3);
//! let trajectory = run_trajectory(&scenario, 4577, 60).unwrap();
//! assert!(trajectory.has_trust());
//! ```

// Re-export all subcrates
pub use mirror_core as core;
pub use mirror_analysis as analysis;
pub use mirror_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use mirror::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mirror_core::types::{AgentId, Phase, Tick};
    pub use mirror_core::state::{HistoryLimit, State};
    pub use mirror_core::trust::{Interaction, InteractionRecord, Trust, TrustModel, TrustOutcome};
    pub use mirror_core::agent::{Decision, MirrorAgent};
    pub use mirror_core::config::{AgentConfig, StateConfig, TrustConfig};

    // Error types
    pub use mirror_core::error::{ConfigError, MirrorError};
    pub use mirror_analysis::error::AnalysisError;
    pub use mirror_runtime::error::{Result, RuntimeError};

    // Analysis
    pub use mirror_analysis::changepoint::detect_changepoints;
    pub use mirror_analysis::ensemble::{summarize_runs, EnsembleSummary};
    pub use mirror_analysis::fit::{fit_series, gradient, polyfit, r_squared, Fit, Polynomial};
    pub use mirror_analysis::hypothesis::{student_t_test, welch_t_test, TTest};
    pub use mirror_analysis::information::{integrated_information, transfer_entropy_proxy};
    pub use mirror_analysis::order::order_parameter;
    pub use mirror_analysis::scaling::{test_scaling_hypothesis, ScalingReport};

    // Runtime
    pub use mirror_runtime::config::{PairScenario, SystemConfig};
    pub use mirror_runtime::system::{MirrorSystem, SimulationOutcome, StepReport};
    pub use mirror_runtime::trajectory::{Metric, Trajectory};
    pub use mirror_runtime::regime::{run_regime, UpdateRegime};
    pub use mirror_runtime::experiment::{
        compare_regimes, complexity_sweep, depletion_sweep, recursive_influence, run_trajectory,
        ComplexitySweep, DepletionSweep, RecursiveInfluence, RegimeComparison,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
