//! Mirror Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use mirror_core::prelude::*;
//! ```

pub use crate::types::{AgentId, Phase, Tick};

pub use crate::state::{HistoryLimit, State};

pub use crate::trust::{Interaction, InteractionRecord, Trust, TrustModel, TrustOutcome};

pub use crate::config::{AgentConfig, StateConfig, TrustConfig};

pub use crate::agent::{Decision, MirrorAgent};

pub use crate::error::{ConfigError, MirrorError, Result};
