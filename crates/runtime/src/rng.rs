//! `rand`-backed randomness for live sessions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use game_core::RandomSource;

/// [`RandomSource`] over `rand`'s standard generator.
#[derive(Clone, Debug)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Reproducible sequence for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for StdRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sequences_repeat() {
        let mut a = StdRandom::seeded(7);
        let mut b = StdRandom::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn index_stays_in_range() {
        let mut rng = StdRandom::seeded(1);
        assert_eq!(rng.next_index(0), 0);
        assert!((0..100).all(|_| rng.next_index(3) < 3));
    }
}
