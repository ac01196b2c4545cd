//! Synthetic height data
//!
//! Heights are simulated as independent draws from a normal distribution with
//! a caller-chosen mean and standard deviation. All randomness comes from a
//! [`SampleSeed`], so the same parameters and seed always yield the same
//! dataset.
//!
//! # Examples
//!
//! ```
//! use statlab_data::height::HeightSimulation;
//! use statlab_stats::SampleSeed;
//!
//! let simulation = HeightSimulation::default(); // 1000 heights, N(170, 10)
//! let heights = simulation.generate(SampleSeed::from(1)).unwrap();
//! assert_eq!(heights.len(), 1000);
//! ```

use rand::Rng as _;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};
use statlab_stats::SampleSeed;

use crate::DataError;

/// Parameters of a simulated height dataset, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightSimulation {
    /// Number of heights to generate.
    pub size: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl Default for HeightSimulation {
    fn default() -> Self {
        Self {
            size: 1000,
            mean: 170.0,
            std_dev: 10.0,
        }
    }
}

impl HeightSimulation {
    /// Checks that the parameters describe a valid normal sample.
    ///
    /// # Errors
    ///
    /// [`DataError::InvalidParameter`] if `size` is zero, `mean` is not finite,
    /// or `std_dev` is not a finite positive number.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.size == 0 {
            return Err(DataError::invalid_parameter("size must be a positive integer"));
        }
        if !self.mean.is_finite() {
            return Err(DataError::invalid_parameter(format!(
                "mean must be a finite number, got {}",
                self.mean
            )));
        }
        if !(self.std_dev.is_finite() && self.std_dev > 0.0) {
            return Err(DataError::invalid_parameter(format!(
                "standard deviation must be a positive number, got {}",
                self.std_dev
            )));
        }
        Ok(())
    }

    /// Draws `size` heights from `N(mean, std_dev)`.
    ///
    /// # Errors
    ///
    /// See [`Self::validate`].
    pub fn generate(&self, seed: SampleSeed) -> Result<Vec<f64>, DataError> {
        self.validate()?;
        let normal = Normal::new(self.mean, self.std_dev)
            .map_err(|e| DataError::invalid_parameter(e.to_string()))?;
        let heights = seed
            .rng()
            .sample_iter(normal)
            .take(self.size)
            .collect::<Vec<f64>>();
        tracing::debug!(
            size = self.size,
            mean = self.mean,
            std_dev = self.std_dev,
            %seed,
            "generated height data"
        );
        Ok(heights)
    }
}
