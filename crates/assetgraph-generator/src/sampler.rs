//! Seeded sampling primitives.
//!
//! All randomness in the generator flows through [`SeededSampler`], an
//! explicit seed-stream object threaded through every sampling call.
//! There is no global RNG: a sampler is a pure function of its seed and
//! the sequence of requests made against it, and advancing its state is
//! the only side effect.

use assetgraph_core::{GenerateError, Point3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Deterministic pseudo-random source plus distribution helpers.
#[derive(Debug)]
pub struct SeededSampler {
    rng: StdRng,
}

impl SeededSampler {
    /// Create a sampler from a 64-bit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform fraction in `[0, 1)`.
    pub fn uniform_f64(&mut self) -> f64 {
        self.rng.random_range(0.0..1.0)
    }

    /// Uniform float in `[min, max]`.
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        self.rng.random_range(min..=max)
    }

    /// Uniform integer in `[min, max]`.
    pub fn range_u64(&mut self, min: u64, max: u64) -> u64 {
        self.rng.random_range(min..=max)
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    /// Pick one item uniformly from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }

    /// Weighted categorical pick: returns an index with probability
    /// proportional to its weight. Weights need not sum to 1.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Result<usize, GenerateError> {
        let total = checked_total("categorical", weights)?;
        let mut target = self.uniform_f64() * total;
        for (i, weight) in weights.iter().enumerate() {
            if *weight <= 0.0 {
                continue;
            }
            if target < *weight {
                return Ok(i);
            }
            target -= *weight;
        }
        // Float accumulation can leave a sliver past the last weight.
        Ok(weights
            .iter()
            .rposition(|w| *w > 0.0)
            .expect("total > 0 implies a positive weight"))
    }

    /// A random permutation of `0..len` (Fisher-Yates).
    pub fn shuffled_indices(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        for i in (1..len).rev() {
            let j = self.index(i + 1);
            order.swap(i, j);
        }
        order
    }

    /// A 3-vector with each component uniform in its range, rounded to
    /// two decimals.
    pub fn point3(&mut self, ranges: [(f64, f64); 3]) -> Point3 {
        [
            round2(self.range_f64(ranges[0].0, ranges[0].1)),
            round2(self.range_f64(ranges[1].0, ranges[1].1)),
            round2(self.range_f64(ranges[2].0, ranges[2].1)),
        ]
    }

    /// Deterministic RFC 4122 v4 UUID drawn from the seed stream.
    pub fn uuid_v4(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill(&mut bytes[..]);

        bytes[6] = (bytes[6] & 0x0f) | 0x40; // Version 4
        bytes[8] = (bytes[8] & 0x3f) | 0x80; // Variant RFC 4122

        Uuid::from_bytes(bytes)
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Validate a weight set for categorical sampling.
pub fn validate_weights(label: &str, weights: &[f64]) -> Result<(), GenerateError> {
    checked_total(label, weights).map(|_| ())
}

fn checked_total(label: &str, weights: &[f64]) -> Result<f64, GenerateError> {
    if weights.is_empty() {
        return Err(GenerateError::InvalidDistribution(format!(
            "{label} distribution has no entries"
        )));
    }
    let mut total = 0.0;
    for weight in weights {
        if !weight.is_finite() || *weight < 0.0 {
            return Err(GenerateError::InvalidDistribution(format!(
                "{label} weight {weight} is not a finite non-negative number"
            )));
        }
        total += weight;
    }
    if total <= 0.0 {
        return Err(GenerateError::InvalidDistribution(format!(
            "{label} weights sum to zero"
        )));
    }
    Ok(total)
}

/// Percentile-bucketed integer sampler.
///
/// Parameterized by monotonically increasing percentile breakpoints
/// (e.g. P50=287, P75=592, P95=997, P99=4491) over a `[min, max]`
/// range. Sampling first draws a uniform fraction to select the bucket
/// whose cumulative probability mass contains it, then draws
/// **log-uniformly** within the bucket's numeric range, which avoids
/// clustering at bucket edges for heavy-tailed shapes.
#[derive(Debug, Clone)]
pub struct PercentileBuckets {
    buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    /// Cumulative probability mass up to and including this bucket.
    cumulative: f64,
    lo: u64,
    hi: u64,
}

impl PercentileBuckets {
    /// Build a sampler from `(cumulative_probability, upper_value)`
    /// breakpoints over `[min, max]`. Fails with `InvalidDistribution`
    /// when the breakpoints are empty or not strictly increasing in
    /// both probability and value, or the range is degenerate.
    pub fn new(min: u64, breakpoints: &[(f64, u64)], max: u64) -> Result<Self, GenerateError> {
        if breakpoints.is_empty() {
            return Err(GenerateError::InvalidDistribution(
                "percentile sampler needs at least one breakpoint".to_string(),
            ));
        }
        if min == 0 {
            return Err(GenerateError::InvalidDistribution(
                "percentile sampler range must start at 1 or above".to_string(),
            ));
        }

        let mut buckets = Vec::with_capacity(breakpoints.len() + 1);
        let mut prev_p = 0.0;
        let mut lo = min;

        for (p, value) in breakpoints {
            if !p.is_finite() || *p <= prev_p || *p >= 1.0 {
                return Err(GenerateError::InvalidDistribution(format!(
                    "percentile breakpoints must be strictly increasing in (0, 1), got {p}"
                )));
            }
            if *value < lo {
                return Err(GenerateError::InvalidDistribution(format!(
                    "percentile breakpoint value {value} is below the running minimum {lo}"
                )));
            }
            buckets.push(Bucket {
                cumulative: *p,
                lo,
                hi: *value,
            });
            prev_p = *p;
            lo = value + 1;
        }

        if max < lo {
            return Err(GenerateError::InvalidDistribution(format!(
                "percentile sampler maximum {max} is below the last breakpoint"
            )));
        }
        buckets.push(Bucket {
            cumulative: 1.0,
            lo,
            hi: max,
        });

        Ok(Self { buckets })
    }

    /// The property-count distribution measured from the reference
    /// tenant: P50=287, P75=592, P95=997, P99=4491 over [114, 5000].
    pub fn property_counts() -> Result<Self, GenerateError> {
        Self::new(
            114,
            &[(0.50, 287), (0.75, 592), (0.95, 997), (0.99, 4491)],
            5000,
        )
    }

    /// Sample one value.
    pub fn sample(&self, sampler: &mut SeededSampler) -> u64 {
        let fraction = sampler.uniform_f64();
        let bucket = self
            .buckets
            .iter()
            .find(|b| fraction < b.cumulative)
            .unwrap_or_else(|| self.buckets.last().expect("buckets are never empty"));

        if bucket.lo == bucket.hi {
            return bucket.lo;
        }

        // Log-uniform within the bucket.
        let ln_lo = (bucket.lo as f64).ln();
        let ln_hi = ((bucket.hi + 1) as f64).ln();
        let value = (ln_lo + sampler.uniform_f64() * (ln_hi - ln_lo)).exp() as u64;
        value.clamp(bucket.lo, bucket.hi)
    }

    /// Inclusive range this sampler draws from.
    pub fn range(&self) -> (u64, u64) {
        (
            self.buckets.first().expect("buckets are never empty").lo,
            self.buckets.last().expect("buckets are never empty").hi,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_deterministic() {
        let mut a = SeededSampler::from_seed(42);
        let mut b = SeededSampler::from_seed(42);

        for _ in 0..100 {
            assert_eq!(a.range_u64(0, 1_000_000), b.range_u64(0, 1_000_000));
        }
        assert_eq!(a.uuid_v4(), b.uuid_v4());
    }

    #[test]
    fn test_uuid_v4_version_and_variant() {
        let mut sampler = SeededSampler::from_seed(7);
        let uuid = sampler.uuid_v4();
        assert_eq!(uuid.get_version_num(), 4);
    }

    #[test]
    fn test_weighted_index_respects_weights() {
        let mut sampler = SeededSampler::from_seed(42);
        let weights = [0.0, 5.0, 0.0, 1.0];

        let mut counts = [0u32; 4];
        for _ in 0..6000 {
            counts[sampler.weighted_index(&weights).unwrap()] += 1;
        }

        assert_eq!(counts[0], 0);
        assert_eq!(counts[2], 0);
        // ~5:1 split; allow generous slack.
        assert!(counts[1] > 4 * counts[3]);
    }

    #[test]
    fn test_weighted_index_rejects_bad_weights() {
        let mut sampler = SeededSampler::from_seed(42);

        assert!(matches!(
            sampler.weighted_index(&[]),
            Err(GenerateError::InvalidDistribution(_))
        ));
        assert!(matches!(
            sampler.weighted_index(&[0.0, 0.0]),
            Err(GenerateError::InvalidDistribution(_))
        ));
        assert!(matches!(
            sampler.weighted_index(&[1.0, f64::NAN]),
            Err(GenerateError::InvalidDistribution(_))
        ));
        assert!(matches!(
            sampler.weighted_index(&[1.0, -2.0]),
            Err(GenerateError::InvalidDistribution(_))
        ));
    }

    #[test]
    fn test_shuffled_indices_is_permutation() {
        let mut sampler = SeededSampler::from_seed(42);
        let mut order = sampler.shuffled_indices(20);
        order.sort_unstable();
        assert_eq!(order, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_percentile_buckets_validation() {
        // Non-increasing probabilities.
        assert!(PercentileBuckets::new(1, &[(0.5, 10), (0.5, 20)], 100).is_err());
        // Probability out of range.
        assert!(PercentileBuckets::new(1, &[(1.0, 10)], 100).is_err());
        // Non-increasing values.
        assert!(PercentileBuckets::new(1, &[(0.5, 50), (0.9, 20)], 100).is_err());
        // Max below last breakpoint.
        assert!(PercentileBuckets::new(1, &[(0.5, 50)], 40).is_err());
        // Empty.
        assert!(PercentileBuckets::new(1, &[], 100).is_err());

        PercentileBuckets::new(1, &[(0.5, 50)], 100).unwrap();
    }

    #[test]
    fn test_percentile_samples_stay_in_range() {
        let buckets = PercentileBuckets::property_counts().unwrap();
        let mut sampler = SeededSampler::from_seed(42);

        let (min, max) = buckets.range();
        for _ in 0..10_000 {
            let value = buckets.sample(&mut sampler);
            assert!((min..=max).contains(&value));
        }
    }

    #[test]
    fn test_percentile_fidelity() {
        // 100k samples against the configured breakpoints over
        // [1, 5000]; empirical percentiles must land within ±5%.
        let breakpoints = [(0.50, 287), (0.75, 592), (0.95, 997), (0.99, 4491)];
        let buckets = PercentileBuckets::new(1, &breakpoints, 5000).unwrap();
        let mut sampler = SeededSampler::from_seed(42);

        let mut samples: Vec<u64> = (0..100_000).map(|_| buckets.sample(&mut sampler)).collect();
        samples.sort_unstable();

        for (p, expected) in breakpoints {
            let idx = ((samples.len() as f64 * p) as usize).min(samples.len() - 1);
            let actual = samples[idx] as f64;
            let tolerance = expected as f64 * 0.05;
            assert!(
                (actual - expected as f64).abs() <= tolerance,
                "P{} expected ~{expected}, got {actual}",
                (p * 100.0) as u32
            );
        }
    }
}
