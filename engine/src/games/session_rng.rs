use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for bot decisions.
///
/// Bots never reach for a global generator; every random decision goes
/// through an implementation of this trait owned by the caller.
pub trait BotRng {
    /// Returns `true` with the given probability. Probabilities at or below
    /// zero (and NaN) never fire, at or above one always fire, and neither
    /// consumes randomness.
    fn chance(&mut self, probability: f64) -> bool;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}

impl BotRng for SessionRng {
    fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() || probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.rng.random_bool(probability)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}
