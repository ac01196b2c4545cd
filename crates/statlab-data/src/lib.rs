//! Dataset providers for the statlab exercises
//!
//! This crate produces the samples that the statistics engine
//! ([`statlab_stats`]) analyzes. It knows where data comes from and how it is
//! shaped, but computes nothing beyond grouping and counting.
//!
//! # Overview
//!
//! ## Simulated Heights
//!
//! [`height::HeightSimulation`] draws normally distributed heights from a
//! seeded generator, so every run can be reproduced from its seed.
//!
//! ## Heart-Disease Records
//!
//! [`heart::HeartDiseaseDataset`] loads patient records from CSV and exposes:
//!
//! - **Group comparisons**: diseased men vs. women, mean cholesterol per
//!   (sex, disease) group
//! - **Chart axes**: ages of diseased patients, maximum heart rate by disease
//!   presence, exercise-induced angina frequency
//! - **Raw columns**: any numeric column as a sample
//!
//! # Examples
//!
//! ```
//! use statlab_data::height::HeightSimulation;
//! use statlab_stats::{SampleSeed, describe};
//!
//! let heights = HeightSimulation {
//!     size: 200,
//!     mean: 165.0,
//!     std_dev: 8.0,
//! }
//! .generate(SampleSeed::from(7))?;
//!
//! let stats = describe(&heights)?;
//! assert!((stats.mean - 165.0).abs() < 3.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod heart;
pub mod height;

pub use self::error::DataError;
