//! # Estimator configuration
//!
//! Settings for the sampling estimator, with presets.
//!
//! ```rust
//! use cu_core::EstimatorConfig;
//!
//! let config = EstimatorConfig::default();
//! let quick = EstimatorConfig::quick().with_seed(7);
//! assert!(quick.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Sample streams used when `workers` is 0. Fixed so that a seed gives the
/// same estimate on any machine.
pub const DEFAULT_SAMPLE_STREAMS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Number of simulated legs.
    pub samples: usize,
    pub seed: u64,
    /// Split the samples over a rayon thread pool.
    pub parallel: bool,
    /// Sample streams when `parallel` is set; 0 uses [`DEFAULT_SAMPLE_STREAMS`].
    /// Rayon spreads the streams over however many threads it has.
    pub workers: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self { samples: 1000, seed: 0, parallel: false, workers: 0 }
    }
}

impl EstimatorConfig {
    /// Fast look at a board, good to a few percent.
    pub fn quick() -> Self {
        Self { samples: 200, ..Self::default() }
    }

    /// Close enough to compare against the exact enumeration.
    pub fn thorough() -> Self {
        Self { samples: 200_000, parallel: true, ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(CoreError::InvalidParameter("samples must be positive".to_string()));
        }
        if self.parallel && self.workers > self.samples {
            return Err(CoreError::InvalidParameter(format!(
                "{} workers for only {} samples",
                self.workers, self.samples
            )));
        }
        Ok(())
    }

    /// Stream count actually used by the parallel estimator. Depends on the
    /// configuration only, never on the thread pool.
    pub fn effective_workers(&self) -> usize {
        let workers = if self.workers == 0 { DEFAULT_SAMPLE_STREAMS } else { self.workers };
        workers.clamp(1, self.samples.max(1))
    }
}
