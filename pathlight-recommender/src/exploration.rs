//! Seeded exploration jitter for ranking diversity.
//!
//! Exploration is opt-in and explicit: the caller supplies the seed, the
//! jitter derives from a counter-based generator keyed on seed and item
//! identifier, and identical seeds reproduce identical rankings. The
//! scoring path never consults an ambient random source.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// The exploration weight was unusable.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("exploration weight must be finite and non-negative")]
pub struct InvalidExploration;

/// Jitter weight used by [`Exploration::seeded`].
pub const DEFAULT_EXPLORATION_WEIGHT: f32 = 0.1;

/// Deterministic score jitter in `0.0..weight`, keyed by seed and item.
///
/// # Examples
/// ```
/// use pathlight_recommender::Exploration;
///
/// let exploration = Exploration::new(7, 0.1)?;
/// assert_eq!(exploration.jitter(42), exploration.jitter(42));
/// assert!(exploration.jitter(42) < 0.1);
/// # Ok::<(), pathlight_recommender::InvalidExploration>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exploration {
    seed: u64,
    weight: f32,
}

impl Exploration {
    /// Construct a strategy from a seed and a jitter weight.
    ///
    /// # Errors
    /// Returns [`InvalidExploration`] when the weight is negative or not
    /// finite.
    pub fn new(seed: u64, weight: f32) -> Result<Self, InvalidExploration> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(InvalidExploration);
        }
        Ok(Self { seed, weight })
    }

    /// Construct a strategy with [`DEFAULT_EXPLORATION_WEIGHT`].
    #[must_use]
    pub const fn seeded(seed: u64) -> Self {
        Self {
            seed,
            weight: DEFAULT_EXPLORATION_WEIGHT,
        }
    }

    /// The configured seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The configured jitter weight.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// Jitter for one item, in `0.0..weight`.
    ///
    /// The item identifier is mixed into the stream key so neighbouring
    /// identifiers draw unrelated values.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "jitter scales a unit-interval draw by the configured weight"
    )]
    pub fn jitter(&self, item_id: u64) -> f32 {
        let stream = self.seed ^ item_id.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut rng = ChaCha8Rng::seed_from_u64(stream);
        rng.r#gen::<f32>() * self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn identical_seeds_reproduce_jitter() {
        let a = Exploration::new(99, 0.1).expect("valid weight");
        let b = Exploration::new(99, 0.1).expect("valid weight");
        assert_eq!(a.jitter(5), b.jitter(5));
    }

    #[rstest]
    fn different_seeds_diverge() {
        let a = Exploration::new(1, 0.1).expect("valid weight");
        let b = Exploration::new(2, 0.1).expect("valid weight");
        assert_ne!(a.jitter(5), b.jitter(5));
    }

    #[rstest]
    fn jitter_is_bounded_by_weight() {
        let exploration = Exploration::new(3, 0.25).expect("valid weight");
        for item_id in 0..100 {
            let jitter = exploration.jitter(item_id);
            assert!((0.0..0.25).contains(&jitter));
        }
    }

    #[rstest]
    fn zero_weight_disables_jitter() {
        let exploration = Exploration::new(11, 0.0).expect("valid weight");
        assert_eq!(exploration.jitter(7), 0.0);
    }

    #[rstest]
    #[case(-0.1)]
    #[case(f32::NAN)]
    #[case(f32::INFINITY)]
    fn malformed_weights_rejected(#[case] weight: f32) {
        assert_eq!(Exploration::new(0, weight), Err(InvalidExploration));
    }
}
