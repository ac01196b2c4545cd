use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::index,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::StatsError;

/// Seed for deterministic random draws.
///
/// This is a 128-bit (16-byte) seed used to initialize a PCG random number
/// generator. Using the same seed reproduces the same draws, so every random
/// step of an analysis can be replayed.
///
/// # Example
///
/// ```
/// use statlab_stats::{SampleSeed, random_sample};
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let seed = SampleSeed::from(42);
///
/// let first = random_sample(&data, 4, seed).unwrap();
/// let second = random_sample(&data, 4, seed).unwrap();
/// assert_eq!(first, second);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleSeed([u8; 16]);

impl SampleSeed {
    /// Seed drawn from the operating system's entropy source.
    #[must_use]
    pub fn random() -> Self {
        rand::rng().random()
    }

    /// Creates the generator this seed describes.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

/// Expands a 64-bit seed into the full 128-bit seed.
impl From<u64> for SampleSeed {
    fn from(seed: u64) -> Self {
        Pcg32::seed_from_u64(seed).random()
    }
}

impl fmt::Display for SampleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for SampleSeed {
    type Err = String;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            ));
        }
        let num = u128::from_str_radix(hex_str, 16)
            .map_err(|e| format!("invalid hex: {hex_str} ({e})"))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SampleSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SampleSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `SampleSeed` values using the standard random distribution.
impl Distribution<SampleSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SampleSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SampleSeed(seed)
    }
}

/// Draws `k` observations without replacement.
///
/// The result lists the drawn observations in draw order. The same `seed`
/// always produces the same output for the same input.
///
/// # Errors
///
/// * [`StatsError::InvalidArgument`] - if `k` exceeds the sample size
pub fn random_sample(sample: &[f64], k: usize, seed: SampleSeed) -> Result<Vec<f64>, StatsError> {
    if k > sample.len() {
        return Err(StatsError::invalid(format!(
            "cannot draw {k} observations from a sample of {}",
            sample.len()
        )));
    }
    let mut rng = seed.rng();
    Ok(index::sample(&mut rng, sample.len(), k)
        .into_iter()
        .map(|idx| sample[idx])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::cast_precision_loss)]
    fn population() -> Vec<f64> {
        (0..100).map(|i| i as f64 * 1.5).collect()
    }

    #[test]
    fn test_same_seed_same_draw() {
        let data = population();
        let seed = SampleSeed::from(7);
        assert_eq!(
            random_sample(&data, 50, seed).unwrap(),
            random_sample(&data, 50, seed).unwrap()
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        let data = population();
        let a = random_sample(&data, 10, SampleSeed::from(1)).unwrap();
        let b = random_sample(&data, 10, SampleSeed::from(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_draws_without_replacement_from_sample() {
        let data = population();
        let mut drawn = random_sample(&data, 50, SampleSeed::from(99)).unwrap();
        assert_eq!(drawn.len(), 50);
        assert!(drawn.iter().all(|v| data.contains(v)));
        drawn.sort_by(f64::total_cmp);
        drawn.dedup();
        assert_eq!(drawn.len(), 50);
    }

    #[test]
    fn test_full_draw_is_permutation() {
        let data = [3.0, 1.0, 2.0];
        let mut drawn = random_sample(&data, 3, SampleSeed::from(5)).unwrap();
        drawn.sort_by(f64::total_cmp);
        assert_eq!(drawn, vec![1.0, 2.0, 3.0]);
        assert!(random_sample(&[], 0, SampleSeed::from(5)).unwrap().is_empty());
    }

    #[test]
    fn test_oversized_draw_fails() {
        let err = random_sample(&[1.0, 2.0, 3.0], 50, SampleSeed::from(0)).unwrap_err();
        assert!(matches!(err, StatsError::InvalidArgument { .. }));
    }

    mod seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed = SampleSeed::random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: SampleSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_hex_format() {
            let seed = SampleSeed([0xAB; 16]);
            assert_eq!(
                serde_json::to_string(&seed).unwrap(),
                format!("\"{}\"", "ab".repeat(16))
            );
        }

        #[test]
        fn test_invalid_hex_length() {
            let result: Result<SampleSeed, _> = serde_json::from_str("\"abc\"");
            assert!(result.is_err());
            assert!("zz".repeat(16).parse::<SampleSeed>().is_err());
        }
    }
}
