use crate::{DataSource, SourceError};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Uniform samples from the closed interval `[low, high]`.
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: StdRng,
    dist: Uniform<f32>,
    seed: Option<u64>,
}

impl UniformSource {
    /// Reproducible stream for a fixed `seed`.
    pub fn new(low: f32, high: f32, seed: u64) -> Result<Self, SourceError> {
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            dist: Self::distribution(low, high)?,
            seed: Some(seed),
        })
    }

    /// Seeded from OS entropy; a different stream on every run.
    pub fn from_entropy(low: f32, high: f32) -> Result<Self, SourceError> {
        Ok(Self {
            rng: StdRng::from_entropy(),
            dist: Self::distribution(low, high)?,
            seed: None,
        })
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn distribution(low: f32, high: f32) -> Result<Uniform<f32>, SourceError> {
        // Uniform::new_inclusive panics on these, so reject them up front.
        if !low.is_finite() || !high.is_finite() || low > high || !(high - low).is_finite() {
            return Err(SourceError::InvalidRange { low, high });
        }
        Ok(Uniform::new_inclusive(low, high))
    }
}

impl DataSource for UniformSource {
    fn next_value(&mut self) -> f32 {
        self.dist.sample(&mut self.rng)
    }
}
