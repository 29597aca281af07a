//! Mirror Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use mirror_runtime::prelude::*;
//! ```

pub use crate::error::{Result, RuntimeError};

pub use crate::config::{PairScenario, SystemConfig, PAIRED_SEED_OFFSET};

pub use crate::trajectory::{Metric, StepMetrics, Trajectory, DISABLED_TRUST};

pub use crate::system::{MirrorSystem, SimulationOutcome, StepReport};

pub use crate::regime::{run_regime, UpdateRegime};

pub use crate::experiment::{
    compare_regimes, complexity_sweep, depletion_sweep, recursive_influence, run_trajectory,
    ComplexitySweep, DepletionSweep, GrowthFit, RecursiveInfluence, RegimeComparison,
};
