//! Construction parameters for [`MpsChain`](crate::MpsChain).

use crate::core::errors::{MpsError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for building a randomly initialised chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MpsConfig {
    /// Number of sites (qubits) N.
    pub site_count: usize,
    /// Bond dimension D of every site matrix.
    pub bond_dimension: usize,
    /// Inclusive lower bound of the uniform initial entries.
    pub init_low: f64,
    /// Exclusive upper bound of the uniform initial entries.
    pub init_high: f64,
    /// Seed for reproducible initialisation. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for MpsConfig {
    fn default() -> Self {
        Self {
            site_count: 5,
            bond_dimension: 3,
            init_low: 0.0,
            init_high: 1.0,
            seed: None,
        }
    }
}

impl MpsConfig {
    pub fn new(site_count: usize, bond_dimension: usize) -> Self {
        Self {
            site_count,
            bond_dimension,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_init_range(mut self, low: f64, high: f64) -> Self {
        self.init_low = low;
        self.init_high = high;
        self
    }

    /// Checks that the configuration describes a buildable chain.
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.site_count, self.bond_dimension)?;
        check_init_range(self.init_low, self.init_high)
    }
}

pub(crate) fn check_dimensions(site_count: usize, bond_dimension: usize) -> Result<()> {
    if site_count == 0 || bond_dimension == 0 {
        return Err(MpsError::InvalidDimensions {
            site_count,
            bond_dimension,
        });
    }
    Ok(())
}

pub(crate) fn check_init_range(low: f64, high: f64) -> Result<()> {
    // `high - low` must be finite as well, not only the endpoints
    if !low.is_finite() || !high.is_finite() || low >= high || !(high - low).is_finite()
    {
        return Err(MpsError::InvalidInitRange { low, high });
    }
    Ok(())
}
